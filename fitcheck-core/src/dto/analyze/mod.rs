//! Outfit analysis DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze-outfit`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOutfit {
    #[serde(default)]
    pub image_url: Option<String>,
}
