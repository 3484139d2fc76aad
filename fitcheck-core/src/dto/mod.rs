//! Data Transfer Objects for the Fitcheck HTTP API
//!
//! Field names follow the JSON the browser front end sends and expects
//! (camelCase requests, snake_case shopping items).

pub mod analyze;
pub mod shopping;
pub mod tryon;

use serde::{Deserialize, Serialize};

/// Error body returned by every endpoint on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
