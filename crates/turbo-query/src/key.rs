//! Query key composition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite identifier of a cached query.
///
/// A key is an ordered list of segments. Two keys are equal only when every
/// segment matches, so `["product", "A", "selectedCurrency", "EUR"]` and
/// `["product", "A", "selectedCurrency", "USD"]` name different entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Start a key with its scope segment (e.g. `"product"`).
    pub fn new(scope: impl Into<String>) -> Self {
        Self(vec![scope.into()])
    }

    /// Append a segment.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Append a named segment as a `name, value` pair.
    pub fn param(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.segment(name).segment(value)
    }

    /// The scope segment.
    pub fn scope(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// All segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{:?}", s)?;
        }
        write!(f, "]")
    }
}
