//! Shopping Service
//!
//! Purchase recommendations for a free-text query.

use fitcheck_client::ClientError;
use fitcheck_core::domain::shopping::menswear_query;
use fitcheck_core::dto::shopping::{ShoppingResults, ShoppingSearch};

use crate::state::ShoppingBackend;

/// Service error type
#[derive(Debug)]
pub enum ShoppingError {
    NotConfigured,
    ValidationError(String),
    UpstreamError(ClientError),
}

/// Search for items matching the posted query
pub async fn search(
    backend: Option<&ShoppingBackend>,
    req: ShoppingSearch,
) -> Result<ShoppingResults, ShoppingError> {
    let query = req
        .search_query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ShoppingError::ValidationError("No query provided".to_string()))?;
    let backend = backend.ok_or(ShoppingError::NotConfigured)?;

    let query = if backend.menswear {
        menswear_query(&query)
    } else {
        query
    };

    tracing::info!("Searching shopping results for: {}", query);

    let results = backend
        .provider
        .search(&query, backend.num_results)
        .await
        .map_err(ShoppingError::UpstreamError)?;

    tracing::debug!("Found {} shopping result(s)", results.len());

    Ok(ShoppingResults {
        query,
        timestamp: chrono::Utc::now(),
        results,
    })
}
