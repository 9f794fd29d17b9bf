use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Smallest series that still describes a polygon.
pub const MIN_EDGES: usize = 3;

/// An insertion-ordered `label -> value` mapping.
///
/// Order is significant: entry `i` owns angular slot `i` of the chart, starting straight up and
/// proceeding clockwise. Re-inserting an existing label updates its value in place and keeps its
/// slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(IndexMap<String, f64>);

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(label.into(), value)
    }

    pub fn with(mut self, label: impl Into<String>, value: f64) -> Self {
        self.insert(label, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.0.get_index(index).map(|(k, _)| k.as_str())
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.0.get_index(index).map(|(_, v)| *v)
    }

    pub fn labels(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.0.values().copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_valid(&self) -> bool {
        self.len() >= MIN_EDGES
    }

    /// Rejects series that cannot describe a polygon.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidSeries { len: self.len() })
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for Series {
    fn from(entries: [(K, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}
