//! Connection settings derived from prepared client options.

use std::fmt;
use std::time::Duration;

use search_probe_shared::ClientOptions;
use url::Url;

use crate::errors::ProbeError;
use crate::options::DEFAULT_TIMEOUT_SECS;

/// Everything needed to open a transport to a single search node.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Node URL, without credentials.
    pub url: Url,
    /// Basic auth username and password, when auth is enabled.
    pub credentials: Option<(String, String)>,
    /// Request timeout.
    pub timeout: Duration,
}

impl ConnectionSettings {
    /// Derive connection settings from client options.
    ///
    /// `hostname` may carry a scheme (`https://search.internal`); `http` is
    /// assumed otherwise. `port`, when set, is appended to the host.
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionSettings)` - Settings ready for a transport
    /// * `Err(ProbeError::ConfigurationMissing)` - If the hostname, or the username with auth enabled, is absent
    /// * `Err(ProbeError::ConfigurationInvalid)` - If the port, timeout or URL cannot be parsed
    pub fn from_options(options: &ClientOptions) -> Result<Self, ProbeError> {
        let hostname = non_blank(options, "hostname")
            .ok_or_else(|| ProbeError::configuration_missing("Search engine hostname is not configured"))?;

        let (scheme, rest) = match hostname.split_once("://") {
            Some((scheme, rest)) => (scheme.to_lowercase(), rest.to_string()),
            None => ("http".to_string(), hostname.clone()),
        };
        if scheme != "http" && scheme != "https" {
            return Err(ProbeError::configuration_invalid(format!(
                "Unsupported scheme '{}' in hostname {}",
                scheme, hostname
            )));
        }

        let (host, path) = match rest.split_once('/') {
            Some((host, path)) => (host, path.trim_end_matches('/')),
            None => (rest.as_str(), ""),
        };

        let port = match non_blank(options, "port") {
            Some(port) => {
                let port: u16 = port.trim().parse().map_err(|_| {
                    ProbeError::configuration_invalid(format!("Invalid port: {}", port))
                })?;
                format!(":{}", port)
            }
            None => String::new(),
        };

        let url = format!("{}://{}{}/{}", scheme, host, port, path);
        let url = Url::parse(&url).map_err(|e| {
            ProbeError::configuration_invalid(format!("Invalid search engine URL {}: {}", url, e))
        })?;

        let credentials = if is_truthy(options.text("enableAuth").as_deref()) {
            let username = non_blank(options, "username").ok_or_else(|| {
                ProbeError::configuration_missing("Authentication is enabled but no username is configured")
            })?;
            Some((username, options.text("password").unwrap_or_default()))
        } else {
            None
        };

        let timeout = match non_blank(options, "timeout") {
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ProbeError::configuration_invalid(format!(
                        "Invalid timeout: {}",
                        secs
                    )))
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            url,
            credentials,
            timeout,
        })
    }
}

// Keeps the password out of logs.
impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("url", &self.url.as_str())
            .field("username", &self.credentials.as_ref().map(|(user, _)| user))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank(options: &ClientOptions, key: &str) -> Option<String> {
    options.text(key).filter(|v| !v.trim().is_empty())
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_probe_shared::OptionValue;

    fn options(hostname: &str, port: &str) -> ClientOptions {
        ClientOptions::new()
            .with("hostname", hostname)
            .with("port", port)
            .with("index", "magento2")
            .with("enableAuth", "0")
            .with("username", OptionValue::Null)
            .with("password", OptionValue::Null)
            .with("timeout", 15u64)
    }

    #[test]
    fn test_plain_hostname() {
        let settings = ConnectionSettings::from_options(&options("localhost", "9200")).unwrap();
        assert_eq!(settings.url.as_str(), "http://localhost:9200/");
        assert!(settings.credentials.is_none());
        assert_eq!(settings.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_hostname_with_scheme_and_path() {
        let settings =
            ConnectionSettings::from_options(&options("HTTPS://search.internal/es/", "443")).unwrap();
        assert_eq!(settings.url.as_str(), "https://search.internal/es");
    }

    #[test]
    fn test_port_is_optional() {
        let settings = ConnectionSettings::from_options(&options("search.internal", "")).unwrap();
        assert_eq!(settings.url.as_str(), "http://search.internal/");
    }

    #[test]
    fn test_missing_hostname() {
        let opts = options("localhost", "9200").with("hostname", OptionValue::Null);
        let err = ConnectionSettings::from_options(&opts).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigurationMissing(_)));

        let err = ConnectionSettings::from_options(&options("  ", "9200")).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigurationMissing(_)));
    }

    #[test]
    fn test_invalid_port() {
        let err = ConnectionSettings::from_options(&options("localhost", "92OO")).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigurationInvalid(_)));

        let err = ConnectionSettings::from_options(&options("localhost", "70000")).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigurationInvalid(_)));
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = ConnectionSettings::from_options(&options("ftp://localhost", "21")).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigurationInvalid(_)));
    }

    #[test]
    fn test_timeout_from_string() {
        let opts = options("localhost", "9200").with("timeout", "30");
        let settings = ConnectionSettings::from_options(&opts).unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(30));

        let opts = options("localhost", "9200").with("timeout", "0");
        let err = ConnectionSettings::from_options(&opts).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigurationInvalid(_)));
    }

    #[test]
    fn test_basic_auth() {
        let opts = options("localhost", "9200")
            .with("enableAuth", "1")
            .with("username", "elastic")
            .with("password", "changeme");
        let settings = ConnectionSettings::from_options(&opts).unwrap();
        assert_eq!(
            settings.credentials,
            Some(("elastic".to_string(), "changeme".to_string()))
        );
        assert!(!format!("{:?}", settings).contains("changeme"));
    }

    #[test]
    fn test_auth_without_username() {
        let opts = options("localhost", "9200").with("enableAuth", "true");
        let err = ConnectionSettings::from_options(&opts).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigurationMissing(_)));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some(" TRUE ")));
        assert!(is_truthy(Some("yes")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(None));
    }
}
