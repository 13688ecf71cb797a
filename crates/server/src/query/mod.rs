//! # List Queries
//!
//! Every list endpoint is a [`FilterSpec`] applied to raw query parameters,
//! followed by [`paginate`].

pub mod filter;
pub mod pagination;

use std::collections::HashMap;

pub use filter::{DateRange, FilterSpec};
pub use pagination::{paginate, PageRequest};

/// Raw query string parameters of a list request.
#[derive(Debug, Clone, Default)]
pub struct ListParams(HashMap<String, String>);

impl ListParams {
    pub fn new(params: HashMap<String, String>) -> Self { Self(params) }

    /// Trimmed value of `key`; empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl From<HashMap<String, String>> for ListParams {
    fn from(params: HashMap<String, String>) -> Self { Self(params) }
}

impl<const N: usize> From<[(&str, &str); N]> for ListParams {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}
