//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! and `ClientFactory` using the OpenSearch Rust client.

use std::time::Instant;

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    OpenSearch,
};
use search_probe_shared::{ClientOptions, EngineId};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::errors::ProbeError;
use crate::interfaces::{ClientFactory, SearchEngineClient};
use crate::opensearch::connection::ConnectionSettings;

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// let options = ClientOptions::new()
///     .with("hostname", "localhost")
///     .with("port", "9200");
/// let settings = ConnectionSettings::from_options(&options)?;
/// let client = OpenSearchClient::new(EngineId::new("opensearch").unwrap(), settings)?;
/// assert!(client.test_connection().await?);
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    engine: EngineId,
    url: Url,
}

impl OpenSearchClient {
    /// Create a new client for a single node.
    ///
    /// No request is sent until [`SearchEngineClient::test_connection`] is called.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(ProbeError)` - If the transport cannot be built
    pub fn new(engine: EngineId, settings: ConnectionSettings) -> Result<Self, ProbeError> {
        let conn_pool = SingleNodeConnectionPool::new(settings.url.clone());
        let mut builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(settings.timeout);

        if let Some((username, password)) = settings.credentials {
            builder = builder.auth(Credentials::Basic(username, password));
        }

        let transport = builder
            .build()
            .map_err(|e| ProbeError::connection(e.to_string()))?;

        info!(
            engine = %engine,
            url = %settings.url,
            timeout_secs = settings.timeout.as_secs(),
            "Created OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
            engine,
            url: settings.url,
        })
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    /// Send `HEAD /` to the node.
    ///
    /// A success status means the engine is reachable; any other status is
    /// reported as `false`. Transport failures (refused connection, DNS,
    /// timeout) are errors.
    #[instrument(skip(self), fields(engine = %self.engine, url = %self.url))]
    async fn test_connection(&self) -> Result<bool, ProbeError> {
        let start = Instant::now();

        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| ProbeError::connection(format!("{} ({})", e, self.url)))?;

        let status = response.status_code();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if status.is_success() {
            debug!(status = %status, elapsed_ms, "Ping succeeded");
            Ok(true)
        } else {
            warn!(status = %status, elapsed_ms, "Ping returned non-success status");
            Ok(false)
        }
    }
}

/// Builds [`OpenSearchClient`]s from prepared client options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSearchClientFactory;

impl OpenSearchClientFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ClientFactory for OpenSearchClientFactory {
    fn create(
        &self,
        engine: &EngineId,
        options: &ClientOptions,
    ) -> Result<Box<dyn SearchEngineClient>, ProbeError> {
        let settings = ConnectionSettings::from_options(options)?;
        debug!(engine = %engine, settings = ?settings, "Creating search client");
        Ok(Box::new(OpenSearchClient::new(engine.clone(), settings)?))
    }
}
