//! Client options builders.
//!
//! Each supported engine reads its connection settings from
//! `catalog/search/<prefix>_<field>` and turns them into [`ClientOptions`].

mod engine_options;

pub use engine_options::{EngineClientOptions, DEFAULT_TIMEOUT_SECS, OPTION_FIELDS};

/// Option key that overrides may add on top of the default keys.
pub const ENGINE_OPTION: &str = "engine";
