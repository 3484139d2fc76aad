//! Outfit analysis domain types

use serde::{Deserialize, Serialize};

/// Styling feedback produced by the vision model for one outfit photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitAnalysis {
    pub message: String,
}
