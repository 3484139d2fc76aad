//! Try-on API Handlers
//!
//! The handler holds the request open until the render finishes; one poll
//! loop runs per request.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use fitcheck_client::{ClientError, PollError};
use fitcheck_core::dto::tryon::{CreateTryOn, TryOnResult};
use tracing::Instrument;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::service::tryon_service::{self, TryOnError};
use crate::state::AppState;

/// POST /api/try-on
/// Render a garment onto a model photo
pub async fn create_try_on(
    State(state): State<AppState>,
    payload: Result<Json<CreateTryOn>, JsonRejection>,
) -> ApiResult<Json<TryOnResult>> {
    let Json(req) = payload?;
    let request_id = Uuid::new_v4();

    async move {
        tracing::info!("Received try-on request");

        let result = tryon_service::run_try_on(state.tryon.as_ref(), req)
            .await
            .map_err(|e| match e {
                TryOnError::ValidationError(msg) => ApiError::BadRequest(msg),
                TryOnError::NotConfigured => ApiError::NotConfigured("Try-on"),
                TryOnError::SubmitFailed(err) => submit_error(err),
                TryOnError::PollFailed(err) => poll_error(err),
            })?;

        Ok::<_, ApiError>(Json(TryOnResult::completed(result)))
    }
    .instrument(tracing::info_span!("try_on", %request_id))
    .await
}

fn submit_error(err: ClientError) -> ApiError {
    tracing::warn!("Try-on submission failed: {}", err);

    match err {
        ClientError::ApiError { status, message } => ApiError::Upstream {
            status,
            message: format!("Try-on API Error ({})", status),
            details: Some(serde_json::json!({ "status": status, "body": message })),
        },
        ClientError::Rejected(msg) | ClientError::InvalidRequest(msg) => ApiError::BadRequest(msg),
        ClientError::ParseError(msg) => ApiError::BadGateway(format!(
            "Invalid response from try-on API: {}",
            msg
        )),
        ClientError::NotFound(_) => {
            ApiError::BadGateway("Try-on API endpoint not found".to_string())
        }
        ClientError::RequestFailed(err) => {
            ApiError::BadGateway(format!("Try-on API unreachable: {}", err))
        }
    }
}

fn poll_error(err: PollError) -> ApiError {
    match err {
        PollError::RemoteFailure(msg) => ApiError::JobFailed(format!("Processing failed: {}", msg)),
        PollError::Timeout {
            attempts,
            last_error,
        } => {
            tracing::warn!(attempts, ?last_error, "Try-on job timed out");
            ApiError::JobTimeout("Timeout waiting for result, please try again".to_string())
        }
        PollError::MalformedResult { handle, payload } => {
            tracing::error!(job_id = %handle, %payload, "Try-on job completed without a result");
            ApiError::BadGateway("Try-on service returned no result".to_string())
        }
        PollError::NotFound(handle) => ApiError::JobGone(format!(
            "Try-on job {} is no longer available, please submit again",
            handle
        )),
        PollError::Cancelled => ApiError::InternalError("Try-on polling cancelled".to_string()),
    }
}
