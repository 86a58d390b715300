//! Interface definitions for the probe's collaborators.
//!
//! The diagnostic procedure only talks to these traits, so every collaborator
//! (configuration source, engine resolver, client) can be swapped for a mock
//! in tests.

mod config_reader;
mod engine_resolver;
mod search_engine_client;

pub use config_reader::ConfigReader;
pub use engine_resolver::{ClientOptionsBuilder, EngineResolver};
pub use search_engine_client::{ClientFactory, SearchEngineClient};
