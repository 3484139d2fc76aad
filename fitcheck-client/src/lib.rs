//! Fitcheck HTTP clients
//!
//! Typed clients for the remote services the outfit rater depends on, plus the
//! poller that waits for asynchronous try-on renders.
//!
//! - [`TryOnClient`]: virtual try-on job submission and status queries
//! - [`VisionClient`]: styling feedback from a vision-capable chat model
//! - [`ShoppingClient`]: shopping search for purchase recommendations
//! - [`JobPoller`]: bounded status polling of a submitted try-on job
//!
//! Every client is constructed explicitly and cheap to clone; there is no
//! process-wide client instance.
//!
//! # Example
//!
//! ```no_run
//! use fitcheck_client::{JobSubmitter, JobPoller, PollConfig, TryOnClient};
//! use fitcheck_core::domain::tryon::TryOnRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TryOnClient::new("fa-api-key");
//!
//!     let handle = client
//!         .submit(&TryOnRequest::new("https://img/model.jpg", "https://img/shirt.jpg"))
//!         .await?;
//!
//!     let poller = JobPoller::new(client, PollConfig::default());
//!     let result_url = poller.await_completion(&handle).await?;
//!
//!     println!("Rendered: {}", result_url);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod poller;
mod shopping;
mod tryon;
mod vision;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poller::{Backoff, JobPoller, PollConfig, PollError, StatusSource, await_completion};
pub use shopping::{DEFAULT_SHOPPING_URL, ShoppingClient, ShoppingProvider};
pub use tryon::{DEFAULT_TRYON_URL, JobSubmitter, TryOnClient};
pub use vision::{DEFAULT_VISION_MODEL, DEFAULT_VISION_URL, OutfitAnalyzer, VisionClient};

use serde::de::DeserializeOwned;

/// Normalizes a base URL so paths can be appended with `format!("{}/...")`
pub(crate) fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

/// Check the status code and deserialize a JSON body
///
/// 404 maps to [`ClientError::NotFound`], any other non-success status to
/// [`ClientError::ApiError`] carrying the response body.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(error_text));
        }
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    let body = response.text().await?;

    serde_json::from_str(&body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}
