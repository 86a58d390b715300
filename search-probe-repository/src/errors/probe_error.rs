//! Probe error types.
//!
//! This module defines the error categories a diagnostic run can fail with.

use thiserror::Error;

/// Errors that can occur while resolving, configuring or probing a search engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// A setting required to reach the engine is not configured.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// A setting is present but cannot be used.
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    /// No search engine is configured.
    #[error("Engine resolution failed: {0}")]
    EngineResolutionFailed(String),

    /// The engine has no options builder, or the builder failed.
    #[error("Options build failed: {0}")]
    OptionsBuildFailed(String),

    /// The engine could not be reached.
    #[error("Connection error: {0}")]
    ConnectionFailed(String),
}

impl ProbeError {
    /// Create a configuration missing error.
    pub fn configuration_missing(msg: impl Into<String>) -> Self {
        Self::ConfigurationMissing(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn configuration_invalid(msg: impl Into<String>) -> Self {
        Self::ConfigurationInvalid(msg.into())
    }

    /// Create an engine resolution error.
    pub fn engine_resolution(msg: impl Into<String>) -> Self {
        Self::EngineResolutionFailed(msg.into())
    }

    /// Create an options build error.
    pub fn options_build(msg: impl Into<String>) -> Self {
        Self::OptionsBuildFailed(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionFailed(msg.into())
    }

    /// Name of the error category, as printed on the `Exception:` line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing(_) => "ConfigurationMissing",
            Self::ConfigurationInvalid(_) => "ConfigurationInvalid",
            Self::EngineResolutionFailed(_) => "EngineResolutionFailed",
            Self::OptionsBuildFailed(_) => "OptionsBuildFailed",
            Self::ConnectionFailed(_) => "ConnectionFailed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ProbeError::configuration_missing("x").kind(), "ConfigurationMissing");
        assert_eq!(ProbeError::configuration_invalid("x").kind(), "ConfigurationInvalid");
        assert_eq!(ProbeError::engine_resolution("x").kind(), "EngineResolutionFailed");
        assert_eq!(ProbeError::options_build("x").kind(), "OptionsBuildFailed");
        assert_eq!(ProbeError::connection("x").kind(), "ConnectionFailed");
    }

    #[test]
    fn test_display() {
        let err = ProbeError::connection("connection refused");
        assert_eq!(err.to_string(), "Connection error: connection refused");
    }
}
