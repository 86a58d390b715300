//! Client options prepared for a search engine connection.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// A single client option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// The setting is not configured.
    Null,
    Str(String),
    Int(u64),
}

impl OptionValue {
    /// Build a value from an optional configuration string.
    pub fn from_config(value: Option<String>) -> Self {
        value.map(Self::Str).unwrap_or(Self::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Textual form of the value, `None` when it is `Null`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Str(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

/// Insertion-ordered mapping from option name to value.
///
/// Order is significant: it is the order in which an options builder
/// produced the keys and the order in which they are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientOptions(IndexMap<String, OptionValue>);

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option. Replacing an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`ClientOptions::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Textual value of an option; absent keys and `Null` both yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(OptionValue::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keep only the options whose key satisfies the predicate, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|key, _| keep(key));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for ClientOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}
