//! # Search Probe Repository
//!
//! This crate provides the collaborators of the search engine probe:
//! a layered configuration source, the engine resolver with its per-engine
//! client options builders, and an OpenSearch client that performs the
//! connectivity check. Each collaborator sits behind a trait in
//! [`interfaces`] so it can be replaced in tests.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod options;
pub mod resolver;

pub use config::ScopeConfig;
pub use errors::ProbeError;
pub use interfaces::{
    ClientFactory, ClientOptionsBuilder, ConfigReader, EngineResolver, SearchEngineClient,
};
pub use opensearch::{OpenSearchClient, OpenSearchClientFactory};
pub use resolver::ClientResolver;
