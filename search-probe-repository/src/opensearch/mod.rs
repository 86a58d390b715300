//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using the OpenSearch transport. The probe (`HEAD /`) is answered the same
//! way by OpenSearch and Elasticsearch 7/8, so one client serves every
//! registered engine.

mod client;
mod connection;

pub use client::{OpenSearchClient, OpenSearchClientFactory};
pub use connection::ConnectionSettings;
