//! Try-on Service
//!
//! Submits a render and holds the request open while polling for its result.

use fitcheck_client::{ClientError, PollError};
use fitcheck_core::domain::tryon::TryOnRequest;
use fitcheck_core::dto::tryon::CreateTryOn;

use crate::state::TryOnBackend;

/// Service error type
#[derive(Debug)]
pub enum TryOnError {
    NotConfigured,
    ValidationError(String),
    SubmitFailed(ClientError),
    PollFailed(PollError),
}

/// Submit a try-on job and wait for its result URL
///
/// Each call runs its own poll loop. Dropping the returned future (the
/// client disconnected) stops polling; the remote render is left alone.
pub async fn run_try_on(
    backend: Option<&TryOnBackend>,
    req: CreateTryOn,
) -> Result<String, TryOnError> {
    let req = validate(req)?;
    let backend = backend.ok_or(TryOnError::NotConfigured)?;

    let handle = backend
        .submitter
        .submit(&req)
        .await
        .map_err(TryOnError::SubmitFailed)?;

    tracing::info!("Try-on job submitted: {}", handle);

    backend
        .poller
        .await_completion(&handle)
        .await
        .map_err(TryOnError::PollFailed)
}

fn validate(req: CreateTryOn) -> Result<TryOnRequest, TryOnError> {
    let has_model_image = req.model_image.as_deref().is_some_and(|s| !s.is_empty());
    let has_garment_image = req.garment_image.as_deref().is_some_and(|s| !s.is_empty());

    req.into_request().ok_or_else(|| {
        tracing::warn!(
            has_model_image,
            has_garment_image,
            "Missing required images"
        );
        TryOnError::ValidationError("Missing required images".to_string())
    })
}
