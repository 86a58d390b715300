use std::fmt;

use serde::Serialize;

/// Identifier of a configured search engine (`elasticsearch8`, `opensearch`, ...).
///
/// Always non-blank and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EngineId(String);

impl EngineId {
    /// Create an engine identifier, returning `None` for blank input.
    pub fn new(id: impl AsRef<str>) -> Option<Self> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EngineId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
