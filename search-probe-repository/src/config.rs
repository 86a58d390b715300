//! Layered configuration source for the probe.
//!
//! Values are keyed by slash-separated paths (`catalog/search/engine`) and come
//! from, in increasing precedence:
//!
//! 1. an optional JSON file, nested (`{"catalog": {"search": {...}}}`) or flat
//!    (`{"catalog/search/engine": "opensearch"}`),
//! 2. `CONFIG__DEFAULT__<PATH>` environment variables, where `<PATH>` is the
//!    path upper-cased with `/` replaced by `__`,
//! 3. values set explicitly with [`ScopeConfig::with_value`].

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::ProbeError;
use crate::interfaces::ConfigReader;

/// Prefix of environment variables that override configuration paths.
pub const ENV_PREFIX: &str = "CONFIG__DEFAULT__";

/// In-memory configuration keyed by path.
#[derive(Debug, Clone, Default)]
pub struct ScopeConfig {
    values: BTreeMap<String, String>,
}

impl ScopeConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from an optional JSON file and the process environment.
    ///
    /// # Returns
    ///
    /// * `Ok(ScopeConfig)` - The merged configuration
    /// * `Err(ProbeError)` - If the file cannot be read or is not valid JSON
    pub fn load(file: Option<&Path>) -> Result<Self, ProbeError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::new(),
        };
        config.merge_env(utf8_overrides(std::env::vars_os()));
        info!(values = config.values.len(), "Loaded configuration");
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ProbeError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ProbeError::configuration_missing(format!(
                "Cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!(path = %path.display(), "Read config file");
        Self::from_json_str(&contents)
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ProbeError> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| ProbeError::configuration_invalid(format!("Invalid config JSON: {}", e)))?;

        if !document.is_object() {
            return Err(ProbeError::configuration_invalid(
                "Config document must be a JSON object",
            ));
        }

        let mut config = Self::new();
        config.merge_json("", &document);
        Ok(config)
    }

    /// Apply `CONFIG__DEFAULT__*` overrides from the given variables.
    ///
    /// Variables without the prefix are ignored.
    pub fn merge_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(path) = env_var_path(&name) {
                debug!(path = %path, "Config override from environment");
                self.values.insert(path, value);
            }
        }
    }

    /// Set a single value, overriding any loaded one.
    pub fn with_value(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(path.into(), value.into());
        self
    }

    /// Number of configured paths.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn merge_json(&mut self, prefix: &str, value: &Value) {
        let leaf = match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.trim_matches('/').to_string()
                    } else {
                        format!("{}/{}", prefix, key.trim_matches('/'))
                    };
                    self.merge_json(&path, child);
                }
                return;
            }
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
            // null means unset; arrays have no path form
            Value::Null | Value::Array(_) => return,
        };
        self.values.insert(prefix.to_string(), leaf);
    }
}

impl ConfigReader for ScopeConfig {
    fn value(&self, path: &str) -> Option<String> {
        self.values.get(path).cloned()
    }
}

/// Keep the `CONFIG__DEFAULT__*` variables that are valid UTF-8.
///
/// Unrelated variables are skipped whatever their encoding; overrides whose
/// value is not UTF-8 are skipped with a warning.
fn utf8_overrides<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| {
            let name = name.into_string().ok()?;
            if !name.starts_with(ENV_PREFIX) {
                return None;
            }
            match value.into_string() {
                Ok(value) => Some((name, value)),
                Err(_) => {
                    warn!(variable = %name, "Ignoring config override with non UTF-8 value");
                    None
                }
            }
        })
        .collect()
}

/// Map `CONFIG__DEFAULT__CATALOG__SEARCH__ENGINE` to `catalog/search/engine`.
fn env_var_path(name: &str) -> Option<String> {
    let rest = name.strip_prefix(ENV_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(
        rest.split("__")
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("/"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_nested_json() {
        let config = ScopeConfig::from_json_str(
            r#"{"catalog": {"search": {"engine": "elasticsearch8", "elasticsearch8_server_port": 9200}}}"#,
        )
        .unwrap();

        assert_eq!(
            config.value("catalog/search/engine"),
            Some("elasticsearch8".to_string())
        );
        assert_eq!(
            config.value("catalog/search/elasticsearch8_server_port"),
            Some("9200".to_string())
        );
    }

    #[test]
    fn test_flat_json() {
        let config = ScopeConfig::from_json_str(
            r#"{"catalog/search/engine": "opensearch", "catalog/search/opensearch_enable_auth": true}"#,
        )
        .unwrap();

        assert_eq!(config.value("catalog/search/engine"), Some("opensearch".to_string()));
        assert_eq!(
            config.value("catalog/search/opensearch_enable_auth"),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_null_and_missing_are_absent() {
        let config =
            ScopeConfig::from_json_str(r#"{"catalog": {"search": {"engine": null}}}"#).unwrap();

        assert_eq!(config.value("catalog/search/engine"), None);
        assert_eq!(config.value("catalog/search/elasticsearch8_server_port"), None);
    }

    #[test]
    fn test_empty_string_is_kept() {
        let config = ScopeConfig::new().with_value("catalog/search/engine", "");
        assert_eq!(config.value("catalog/search/engine"), Some(String::new()));
    }

    #[test]
    fn test_invalid_json() {
        let err = ScopeConfig::from_json_str("{not json").unwrap_err();
        assert_eq!(err.kind(), "ConfigurationInvalid");

        let err = ScopeConfig::from_json_str("[1, 2]").unwrap_err();
        assert_eq!(err.kind(), "ConfigurationInvalid");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config =
            ScopeConfig::from_json_str(r#"{"catalog/search/engine": "elasticsearch7"}"#).unwrap();
        config.merge_env(vec![
            (
                "CONFIG__DEFAULT__CATALOG__SEARCH__ENGINE".to_string(),
                "opensearch".to_string(),
            ),
            (
                "CONFIG__DEFAULT__CATALOG__SEARCH__OPENSEARCH_SERVER_HOSTNAME".to_string(),
                "search.internal".to_string(),
            ),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ]);

        assert_eq!(config.value("catalog/search/engine"), Some("opensearch".to_string()));
        assert_eq!(
            config.value("catalog/search/opensearch_server_hostname"),
            Some("search.internal".to_string())
        );
        assert_eq!(config.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_utf8_overrides_skip_invalid_encoding() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (
                OsString::from("UNRELATED_BINARY"),
                OsString::from_vec(vec![0xff, 0xfe]),
            ),
            (
                OsString::from_vec(b"\xffCONFIG__DEFAULT__X".to_vec()),
                OsString::from("ignored"),
            ),
            (
                OsString::from("CONFIG__DEFAULT__CATALOG__SEARCH__ENGINE"),
                OsString::from("opensearch"),
            ),
            (
                OsString::from("CONFIG__DEFAULT__CATALOG__SEARCH__OPENSEARCH_PASSWORD"),
                OsString::from_vec(vec![0xc3, 0x28]),
            ),
        ];

        let overrides = utf8_overrides(vars);
        assert_eq!(
            overrides,
            vec![(
                "CONFIG__DEFAULT__CATALOG__SEARCH__ENGINE".to_string(),
                "opensearch".to_string()
            )]
        );

        let mut config = ScopeConfig::new();
        config.merge_env(overrides);
        assert_eq!(config.value("catalog/search/engine"), Some("opensearch".to_string()));
        assert_eq!(config.value("catalog/search/opensearch_password"), None);
    }

    #[test]
    fn test_env_var_path() {
        assert_eq!(
            env_var_path("CONFIG__DEFAULT__CATALOG__SEARCH__ELASTICSEARCH8_SERVER_PORT"),
            Some("catalog/search/elasticsearch8_server_port".to_string())
        );
        assert_eq!(env_var_path("CONFIG__DEFAULT__"), None);
        assert_eq!(env_var_path("HOME"), None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"catalog": {{"search": {{"engine": "opensearch"}}}}}}"#).unwrap();

        let config = ScopeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.value("catalog/search/engine"), Some("opensearch".to_string()));
    }

    #[test]
    fn test_missing_file() {
        let err = ScopeConfig::from_file(Path::new("/nonexistent/search-probe.json")).unwrap_err();
        assert_eq!(err.kind(), "ConfigurationMissing");
    }
}
