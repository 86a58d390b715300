//! Dependency initialization and wiring for the search probe.

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::DiagnosticError;
use search_probe_repository::{
    ClientFactory, ClientResolver, ConfigReader, EngineResolver, OpenSearchClientFactory,
    ScopeConfig,
};

/// Container for the collaborators of a diagnostic run.
///
/// Built once, borrowed by [`crate::Diagnostic`], dropped when the run ends.
pub struct DiagnosticContext {
    /// Configuration lookups by path.
    pub config: Arc<dyn ConfigReader>,
    /// Resolves the active engine and its options builder.
    pub resolver: Box<dyn EngineResolver>,
    /// Creates clients from prepared options.
    pub clients: Box<dyn ClientFactory>,
}

impl DiagnosticContext {
    /// Assemble a context from explicit collaborators.
    pub fn new(
        config: Arc<dyn ConfigReader>,
        resolver: Box<dyn EngineResolver>,
        clients: Box<dyn ClientFactory>,
    ) -> Self {
        Self {
            config,
            resolver,
            clients,
        }
    }

    /// Initialize the production collaborators.
    ///
    /// # Configuration Sources
    ///
    /// - `config_file`: optional JSON file with `catalog/search/*` settings
    /// - `CONFIG__DEFAULT__<PATH>` environment variables, overriding the file
    ///
    /// # Returns
    ///
    /// * `Ok(DiagnosticContext)` - Initialized context
    /// * `Err(DiagnosticError)` - If the configuration cannot be loaded
    pub fn from_env(config_file: Option<&Path>) -> Result<Self, DiagnosticError> {
        let config: Arc<dyn ConfigReader> = Arc::new(ScopeConfig::load(config_file)?);

        let resolver = ClientResolver::with_default_engines(Arc::clone(&config));

        info!(
            config_file = ?config_file,
            engines = ?resolver.engines(),
            "Initialized diagnostic context"
        );

        Ok(Self::new(
            config,
            Box::new(resolver),
            Box::new(OpenSearchClientFactory::new()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_probe_repository::ProbeError;

    #[test]
    fn test_from_env_missing_file() {
        let result = DiagnosticContext::from_env(Some(Path::new("/nonexistent/probe.json")));
        assert!(matches!(
            result,
            Err(DiagnosticError::Probe(ProbeError::ConfigurationMissing(_)))
        ));
    }

    #[test]
    fn test_from_env_without_file() {
        let context = DiagnosticContext::from_env(None).unwrap();
        let engines: Vec<String> = context
            .resolver
            .engines()
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(engines, vec!["elasticsearch7", "elasticsearch8", "opensearch"]);
    }
}
