//! Search engine client trait definition.
//!
//! This module defines the abstract interface for the connectivity check,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, mocks).

use async_trait::async_trait;
use search_probe_shared::{ClientOptions, EngineId};

use crate::errors::ProbeError;

/// A client able to probe a search engine.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check that the search engine is reachable and responding.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the engine answered with a success status
    /// * `Ok(false)` - If the engine answered with any other status
    /// * `Err(ProbeError::ConnectionFailed)` - If the engine could not be reached
    async fn test_connection(&self) -> Result<bool, ProbeError>;
}

/// Creates clients for a resolved engine from its prepared options.
pub trait ClientFactory: Send + Sync {
    /// Build a client.
    ///
    /// # Arguments
    ///
    /// * `engine` - The engine the client is for
    /// * `options` - Options produced by the engine's options builder
    ///
    /// # Returns
    ///
    /// * `Ok(Box<dyn SearchEngineClient>)` - A client ready to probe
    /// * `Err(ProbeError)` - If required options are missing or invalid
    fn create(
        &self,
        engine: &EngineId,
        options: &ClientOptions,
    ) -> Result<Box<dyn SearchEngineClient>, ProbeError>;
}
