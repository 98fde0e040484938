use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product as last confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    pub description: String,
}

impl Product {
    /// Case-insensitive substring match on name or description.
    ///
    /// `needle_lower` must already be lowercased; an empty needle matches.
    pub(crate) fn matches_search(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}
