//! Engine resolution and per-engine options builders.

use search_probe_shared::{ClientOptions, EngineId};

use crate::errors::ProbeError;

/// Builds the client options for one engine from configuration.
pub trait ClientOptionsBuilder: Send + Sync {
    /// Prepare client options, merging `overrides` over the configured defaults.
    ///
    /// With an empty override set this returns the engine's default options,
    /// in a stable order.
    fn prepare_client_options(&self, overrides: &ClientOptions)
        -> Result<ClientOptions, ProbeError>;
}

/// Resolves the active search engine and its options builder.
pub trait EngineResolver: Send + Sync {
    /// The engine identifier currently configured.
    ///
    /// # Returns
    ///
    /// * `Ok(EngineId)` - The configured engine
    /// * `Err(ProbeError::EngineResolutionFailed)` - If no engine is configured
    fn current_engine(&self) -> Result<EngineId, ProbeError>;

    /// Construct the options builder registered for `engine`.
    ///
    /// # Returns
    ///
    /// * `Ok(Box<dyn ClientOptionsBuilder>)` - The engine's builder
    /// * `Err(ProbeError::OptionsBuildFailed)` - If the engine has no known builder
    fn options_builder(&self, engine: &EngineId)
        -> Result<Box<dyn ClientOptionsBuilder>, ProbeError>;

    /// Identifiers of every engine with a registered builder, sorted.
    fn engines(&self) -> Vec<EngineId>;
}
