//! Raw query parameters as handed over by the host framework.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A query parameter value: one occurrence or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// The key appeared once.
    Single(String),
    /// The key appeared more than once, in request order.
    Multi(Vec<String>),
}

impl QueryValue {
    /// The single value, or the last one when repeated.
    pub fn last(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(values) => values.last().map(String::as_str),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Single(existing) => {
                *self = Self::Multi(vec![std::mem::take(existing), value]);
            }
            Self::Multi(values) => values.push(value),
        }
    }
}

/// Multi-map from parameter name to [`QueryValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, QueryValue>,
}

impl QueryParams {
    /// Create an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `application/x-www-form-urlencoded` query string.
    ///
    /// Repeated keys are collected into [`QueryValue::Multi`].
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.append(key.into_owned(), value.into_owned());
        }
        params
    }

    /// Add one occurrence of `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.values.entry(key.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value),
            Entry::Vacant(entry) => {
                entry.insert(QueryValue::Single(value));
            }
        }
    }

    /// Replace the value stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) {
        self.values.insert(key.into(), value);
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.values.get(key)
    }

    /// Look up a parameter, keeping only its last occurrence.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(QueryValue::last)
    }

    /// Whether no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
