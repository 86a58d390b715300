/// Read-only access to configuration values keyed by slash-separated paths
/// such as `catalog/search/engine`.
pub trait ConfigReader: Send + Sync {
    /// Look up a value. Absent settings return `None`; this is never an error.
    fn value(&self, path: &str) -> Option<String>;
}
