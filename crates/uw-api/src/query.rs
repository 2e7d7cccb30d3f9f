//! Query string construction

use std::fmt::Display;

/// Ordered query parameters for one request
///
/// Absent values and `false` flags are dropped. List values are sent as
/// repeated `key[]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value unconditionally
    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a value when present
    pub fn opt<T: Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Append `key=true` when the flag is set
    pub fn flag(self, key: &str, value: Option<bool>) -> Self {
        if value == Some(true) {
            self.push(key, true)
        } else {
            self
        }
    }

    /// Append an optional boolean in either state
    pub fn bool(self, key: &str, value: Option<bool>) -> Self {
        self.opt(key, value)
    }

    /// Append each value as `key[]=value`
    pub fn list<T: Display>(mut self, key: &str, values: Option<&[T]>) -> Self {
        let key = format!("{key}[]");
        for value in values.unwrap_or_default() {
            self.pairs.push((key.clone(), value.to_string()));
        }
        self
    }

    /// Keys in insertion order, repeated for list values
    pub fn keys(&self) -> Vec<&str> {
        self.pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values stored under `key`
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
