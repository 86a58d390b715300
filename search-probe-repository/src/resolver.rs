//! Resolution of the active search engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use search_probe_shared::{config_paths, EngineId};
use tracing::{debug, warn};

use crate::errors::ProbeError;
use crate::interfaces::{ClientOptionsBuilder, ConfigReader, EngineResolver};
use crate::options::EngineClientOptions;

/// Engines registered by [`ClientResolver::with_default_engines`], with their config prefix.
pub const DEFAULT_ENGINES: [(&str, &str); 3] = [
    ("elasticsearch7", "elasticsearch7"),
    ("elasticsearch8", "elasticsearch8"),
    ("opensearch", "opensearch"),
];

/// Resolves the configured engine and hands out its options builder.
///
/// The options pool maps each engine identifier to the configuration prefix
/// its builder reads from.
pub struct ClientResolver {
    config: Arc<dyn ConfigReader>,
    options_pool: BTreeMap<String, String>,
}

impl ClientResolver {
    /// Create a resolver with an empty options pool.
    pub fn new(config: Arc<dyn ConfigReader>) -> Self {
        Self {
            config,
            options_pool: BTreeMap::new(),
        }
    }

    /// Create a resolver knowing Elasticsearch 7, Elasticsearch 8 and OpenSearch.
    pub fn with_default_engines(config: Arc<dyn ConfigReader>) -> Self {
        DEFAULT_ENGINES
            .iter()
            .fold(Self::new(config), |resolver, (engine, prefix)| {
                resolver.register(*engine, *prefix)
            })
    }

    /// Register an engine whose settings live under `catalog/search/<prefix>_*`.
    pub fn register(mut self, engine: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.options_pool.insert(engine.into(), prefix.into());
        self
    }
}

impl EngineResolver for ClientResolver {
    fn current_engine(&self) -> Result<EngineId, ProbeError> {
        let configured = self.config.value(config_paths::SEARCH_ENGINE);
        let engine = configured.as_deref().and_then(EngineId::new).ok_or_else(|| {
            warn!(path = config_paths::SEARCH_ENGINE, "No search engine configured");
            ProbeError::engine_resolution(format!(
                "No search engine is configured at {}",
                config_paths::SEARCH_ENGINE
            ))
        })?;

        debug!(engine = %engine, "Resolved current engine");
        Ok(engine)
    }

    fn options_builder(
        &self,
        engine: &EngineId,
    ) -> Result<Box<dyn ClientOptionsBuilder>, ProbeError> {
        let prefix = self.options_pool.get(engine.as_str()).ok_or_else(|| {
            let known: Vec<&str> = self.options_pool.keys().map(String::as_str).collect();
            ProbeError::options_build(format!(
                "No client options builder for engine '{}' (known engines: {})",
                engine,
                known.join(", ")
            ))
        })?;

        Ok(Box::new(EngineClientOptions::new(
            Arc::clone(&self.config),
            prefix.clone(),
        )))
    }

    fn engines(&self) -> Vec<EngineId> {
        self.options_pool.keys().filter_map(EngineId::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScopeConfig;
    use search_probe_shared::ClientOptions;

    fn resolver(config: ScopeConfig) -> ClientResolver {
        ClientResolver::with_default_engines(Arc::new(config))
    }

    #[test]
    fn test_current_engine() {
        let resolver = resolver(ScopeConfig::new().with_value("catalog/search/engine", "opensearch"));
        assert_eq!(resolver.current_engine().unwrap().as_str(), "opensearch");
    }

    #[test]
    fn test_current_engine_missing() {
        let err = resolver(ScopeConfig::new()).current_engine().unwrap_err();
        assert!(matches!(err, ProbeError::EngineResolutionFailed(_)));
    }

    #[test]
    fn test_current_engine_blank() {
        let resolver = resolver(ScopeConfig::new().with_value("catalog/search/engine", "  "));
        let err = resolver.current_engine().unwrap_err();
        assert!(matches!(err, ProbeError::EngineResolutionFailed(_)));
    }

    #[test]
    fn test_options_builder_unknown_engine() {
        let resolver = resolver(ScopeConfig::new());
        let engine = EngineId::new("solr").unwrap();

        let err = resolver.options_builder(&engine).err().unwrap();
        assert!(matches!(err, ProbeError::OptionsBuildFailed(_)));
        assert!(err.to_string().contains("'solr'"));
        assert!(err.to_string().contains("elasticsearch7, elasticsearch8, opensearch"));
    }

    #[test]
    fn test_options_builder_uses_engine_prefix() {
        let resolver = resolver(
            ScopeConfig::new().with_value("catalog/search/opensearch_server_hostname", "os.local"),
        );
        let engine = EngineId::new("opensearch").unwrap();

        let options = resolver
            .options_builder(&engine)
            .unwrap()
            .prepare_client_options(&ClientOptions::new())
            .unwrap();
        assert_eq!(options.text("hostname"), Some("os.local".to_string()));
    }

    #[test]
    fn test_register_custom_engine() {
        let resolver = resolver(ScopeConfig::new()).register("amazon_opensearch", "amazon_opensearch");

        let engines: Vec<String> = resolver.engines().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            engines,
            vec!["amazon_opensearch", "elasticsearch7", "elasticsearch8", "opensearch"]
        );
    }
}
