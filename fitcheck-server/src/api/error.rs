//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fitcheck_core::dto::ErrorBody;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// The request body could not be read as JSON
    UnreadableBody { status: StatusCode, message: String },
    /// The named remote service has no API key
    NotConfigured(&'static str),
    /// A remote service answered with an error status
    Upstream {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },
    /// The try-on job failed remotely
    JobFailed(String),
    /// The try-on job did not finish within the polling budget
    JobTimeout(String),
    /// The try-on job is unknown to the remote service
    JobGone(String),
    BadGateway(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::UnreadableBody { status, message } => (status, message, None),
            ApiError::NotConfigured(service) => {
                tracing::error!("{} API key missing", service);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "API key not configured".to_string(),
                    None,
                )
            }
            ApiError::Upstream {
                status,
                message,
                details,
            } => {
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, message, details)
            }
            ApiError::JobFailed(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            ApiError::JobTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg, None),
            ApiError::JobGone(msg) => (StatusCode::GONE, msg, None),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg, None),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::UnreadableBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
