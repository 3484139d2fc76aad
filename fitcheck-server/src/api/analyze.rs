//! Outfit Analysis API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use fitcheck_core::domain::analysis::OutfitAnalysis;
use fitcheck_core::dto::analyze::AnalyzeOutfit;

use crate::api::error::{ApiError, ApiResult};
use crate::service::analysis_service::{self, AnalysisError};
use crate::state::AppState;

/// POST /api/analyze-outfit
/// Styling feedback for an outfit photo
pub async fn analyze_outfit(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeOutfit>, JsonRejection>,
) -> ApiResult<Json<OutfitAnalysis>> {
    let Json(req) = payload?;
    tracing::info!("Received outfit analysis request");

    let analysis = analysis_service::analyze_outfit(state.analyzer.as_deref(), req)
        .await
        .map_err(|e| match e {
            AnalysisError::ValidationError(msg) => ApiError::BadRequest(msg),
            AnalysisError::NotConfigured => ApiError::NotConfigured("Vision"),
            AnalysisError::UpstreamError(err) => {
                tracing::error!("Vision API error: {}", err);
                ApiError::InternalError("Failed to analyze outfit.".to_string())
            }
        })?;

    Ok(Json(analysis))
}
