//! Analysis Service
//!
//! Styling feedback for an outfit photo.

use fitcheck_client::{ClientError, OutfitAnalyzer};
use fitcheck_core::domain::analysis::OutfitAnalysis;
use fitcheck_core::dto::analyze::AnalyzeOutfit;

/// Service error type
#[derive(Debug)]
pub enum AnalysisError {
    NotConfigured,
    ValidationError(String),
    UpstreamError(ClientError),
}

/// Ask the vision model for feedback on the posted image
pub async fn analyze_outfit(
    analyzer: Option<&dyn OutfitAnalyzer>,
    req: AnalyzeOutfit,
) -> Result<OutfitAnalysis, AnalysisError> {
    let image_url = req
        .image_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AnalysisError::ValidationError("No image provided.".to_string()))?;
    let analyzer = analyzer.ok_or(AnalysisError::NotConfigured)?;

    tracing::info!(image_url_len = image_url.len(), "Requesting outfit analysis");

    analyzer
        .analyze(&image_url)
        .await
        .map_err(AnalysisError::UpstreamError)
}
