//! Well-known configuration paths.

/// Path holding the identifier of the active search engine.
pub const SEARCH_ENGINE: &str = "catalog/search/engine";

/// Hostname of the Elasticsearch 8 server.
pub const ELASTICSEARCH8_SERVER_HOSTNAME: &str = "catalog/search/elasticsearch8_server_hostname";

/// Port of the Elasticsearch 8 server.
pub const ELASTICSEARCH8_SERVER_PORT: &str = "catalog/search/elasticsearch8_server_port";

/// Paths echoed at the start of every diagnostic run, in print order.
pub const REPORTED: [&str; 3] = [
    SEARCH_ENGINE,
    ELASTICSEARCH8_SERVER_HOSTNAME,
    ELASTICSEARCH8_SERVER_PORT,
];

/// Build the path of an engine-scoped setting, e.g.
/// `engine_path("opensearch", "server_port")` is
/// `catalog/search/opensearch_server_port`.
pub fn engine_path(prefix: &str, field: &str) -> String {
    format!("catalog/search/{}_{}", prefix, field)
}
