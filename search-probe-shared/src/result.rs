use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::EngineId;

/// Outcome of a connectivity check against a search engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionTestResult {
    /// Engine the check ran against.
    pub engine: EngineId,
    /// Whether the engine answered the probe with a success status.
    pub reachable: bool,
    /// Round-trip time of the probe.
    pub elapsed: Duration,
    /// When the check completed.
    pub checked_at: DateTime<Utc>,
}

impl ConnectionTestResult {
    pub fn new(engine: EngineId, reachable: bool, elapsed: Duration) -> Self {
        Self {
            engine,
            reachable,
            elapsed,
            checked_at: Utc::now(),
        }
    }
}

/// Renders as `true` or `false`, the form used on the result line.
impl fmt::Display for ConnectionTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reachable)
    }
}
