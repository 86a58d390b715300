//! Options builder shared by Elasticsearch 7/8 and OpenSearch.

use std::sync::Arc;

use search_probe_shared::{config_paths, ClientOptions, OptionValue};
use tracing::debug;

use super::ENGINE_OPTION;
use crate::errors::ProbeError;
use crate::interfaces::{ClientOptionsBuilder, ConfigReader};

/// Request timeout, in seconds, used when `server_timeout` is not configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default option keys and the config field each one is read from, in output order.
pub const OPTION_FIELDS: [(&str, &str); 7] = [
    ("hostname", "server_hostname"),
    ("port", "server_port"),
    ("index", "index_prefix"),
    ("enableAuth", "enable_auth"),
    ("username", "username"),
    ("password", "password"),
    ("timeout", "server_timeout"),
];

/// Builds client options for one engine from its prefixed settings.
pub struct EngineClientOptions {
    config: Arc<dyn ConfigReader>,
    prefix: String,
}

impl EngineClientOptions {
    /// Create a builder reading `catalog/search/<prefix>_*` settings.
    pub fn new(config: Arc<dyn ConfigReader>, prefix: impl Into<String>) -> Self {
        Self {
            config,
            prefix: prefix.into(),
        }
    }

    fn setting(&self, field: &str) -> Option<String> {
        self.config
            .value(&config_paths::engine_path(&self.prefix, field))
    }

    fn default_options(&self) -> ClientOptions {
        OPTION_FIELDS
            .iter()
            .map(|(key, field)| {
                let value = match *key {
                    "timeout" => match self.setting(field) {
                        Some(t) if !t.trim().is_empty() => OptionValue::Str(t),
                        _ => OptionValue::Int(DEFAULT_TIMEOUT_SECS),
                    },
                    _ => OptionValue::from_config(self.setting(field)),
                };
                (*key, value)
            })
            .collect()
    }
}

impl ClientOptionsBuilder for EngineClientOptions {
    fn prepare_client_options(
        &self,
        overrides: &ClientOptions,
    ) -> Result<ClientOptions, ProbeError> {
        let mut options = self.default_options();
        for (key, value) in overrides.iter() {
            options.insert(key, value.clone());
        }

        options.retain(|key| key == ENGINE_OPTION || OPTION_FIELDS.iter().any(|(k, _)| *k == key));

        debug!(
            prefix = %self.prefix,
            keys = options.len(),
            "Prepared client options"
        );
        Ok(options)
    }
}
