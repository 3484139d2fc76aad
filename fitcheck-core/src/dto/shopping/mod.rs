//! Shopping search DTOs

use serde::{Deserialize, Serialize};

use crate::domain::shopping::ShoppingItem;

/// Body of `POST /api/shopping-search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingSearch {
    #[serde(default)]
    pub search_query: Option<String>,
}

/// Shopping search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingResults {
    pub query: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub results: Vec<ShoppingItem>,
}

/// Shopping search failure
///
/// Carries an empty result list so the front end can render "no results"
/// without special-casing the error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingFailure {
    pub error: String,
    pub results: Vec<ShoppingItem>,
}

impl ShoppingFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            results: Vec::new(),
        }
    }
}
