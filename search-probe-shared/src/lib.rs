//! # Search Probe Shared
//!
//! Types shared between the probe's repository layer and the diagnostic
//! binary: configuration paths, engine identifiers, client options and the
//! connection test result.

pub mod config_paths;
mod engine;
mod options;
mod result;

pub use engine::EngineId;
pub use options::{ClientOptions, OptionValue};
pub use result::ConnectionTestResult;
