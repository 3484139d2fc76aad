//! Health Check API Handlers
//!
//! Liveness endpoints for monitoring.

use axum::{Json, http::StatusCode, response::IntoResponse};

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /
/// Banner confirming the server is up
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Server is running!" }))
}
