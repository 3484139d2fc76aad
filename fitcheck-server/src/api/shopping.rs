//! Shopping Search API Handlers
//!
//! Failures keep the `results` field so the front end can always render a
//! list.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use fitcheck_core::dto::shopping::{ShoppingFailure, ShoppingResults, ShoppingSearch};

use crate::service::shopping_service::{self, ShoppingError};
use crate::state::AppState;

/// POST /api/shopping-search
/// Purchase recommendations for a query
pub async fn shopping_search(
    State(state): State<AppState>,
    payload: Result<Json<ShoppingSearch>, JsonRejection>,
) -> Result<Json<ShoppingResults>, (StatusCode, Json<ShoppingFailure>)> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ShoppingFailure::new(rejection.body_text())),
        )
    })?;

    let results = shopping_service::search(state.shopping.as_ref(), req)
        .await
        .map_err(|e| {
            let (status, message) = match e {
                ShoppingError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
                ShoppingError::NotConfigured => {
                    tracing::error!("Shopping API key missing");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Shopping API key not configured".to_string(),
                    )
                }
                ShoppingError::UpstreamError(err) => {
                    tracing::error!("Shopping search error: {}", err);
                    (StatusCode::BAD_GATEWAY, err.to_string())
                }
            };
            (status, Json(ShoppingFailure::new(message)))
        })?;

    Ok(Json(results))
}
