//! Virtual try-on API client
//!
//! Two endpoints matter: `POST /v1/run` submits a render and returns a job id,
//! `GET /v1/status/{id}` reports on it.

use async_trait::async_trait;
use fitcheck_core::domain::tryon::{JobHandle, RemoteError, StatusReport, TryOnRequest};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{ClientError, Result};
use crate::poller::StatusSource;
use crate::{handle_response, normalize_base_url};

/// Default try-on API base URL
pub const DEFAULT_TRYON_URL: &str = "https://api.fashn.ai";

/// Submits try-on jobs
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Submits one render and returns the handle to poll
    async fn submit(&self, req: &TryOnRequest) -> Result<JobHandle>;
}

/// HTTP client for the try-on API
#[derive(Debug, Clone)]
pub struct TryOnClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl TryOnClient {
    /// Create a client against the default API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(DEFAULT_TRYON_URL, api_key, Client::new())
    }

    /// Create a client with a custom base URL and HTTP client
    ///
    /// The HTTP client carries transport settings such as timeouts or proxies.
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the current status of a job
    ///
    /// A 404 comes back as [`ClientError::NotFound`].
    pub async fn status(&self, handle: &JobHandle) -> Result<StatusReport> {
        let url = self.status_url(handle)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        handle_response(response).await
    }
}

impl TryOnClient {
    /// Status endpoint of `handle`, with the id percent-encoded as one segment
    fn status_url(&self, handle: &JobHandle) -> Result<Url> {
        let invalid = || ClientError::InvalidRequest(format!("Invalid base URL: {}", self.base_url));

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["v1", "status", handle.as_str()]);

        Ok(url)
    }
}

/// Answer of the submission endpoint
#[derive(Debug, Deserialize)]
struct RunResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    error: Option<RemoteError>,
}

#[async_trait]
impl JobSubmitter for TryOnClient {
    async fn submit(&self, req: &TryOnRequest) -> Result<JobHandle> {
        if req.model_image.is_empty() || req.garment_image.is_empty() {
            return Err(ClientError::InvalidRequest(
                "Missing required images".to_string(),
            ));
        }

        let url = format!("{}/v1/run", self.base_url);

        tracing::debug!(
            model_image_len = req.model_image.len(),
            garment_image_len = req.garment_image.len(),
            category = ?req.category,
            mode = ?req.mode,
            "Submitting try-on job"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await?;

        let run: RunResponse = handle_response(response).await?;

        if let Some(error) = run.error {
            let message = error
                .message()
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(ClientError::Rejected(message));
        }

        run.id
            .and_then(JobHandle::new)
            .ok_or_else(|| ClientError::ParseError("Submission response has no job id".to_string()))
    }
}

#[async_trait]
impl StatusSource for TryOnClient {
    async fn fetch_status(&self, handle: &JobHandle) -> Result<StatusReport> {
        self.status(handle).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_url(base: &str, id: &str) -> String {
        TryOnClient::with_client(base, "key", Client::new())
            .status_url(&JobHandle::new(id).unwrap())
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_status_url() {
        assert_eq!(
            status_url("https://api.fashn.ai", "abc-123"),
            "https://api.fashn.ai/v1/status/abc-123"
        );
        assert_eq!(
            status_url("http://localhost:8000/proxy/", "abc"),
            "http://localhost:8000/proxy/v1/status/abc"
        );
    }

    #[test]
    fn test_status_url_encodes_job_id() {
        assert_eq!(
            status_url("https://api.fashn.ai", "a/b?c#d"),
            "https://api.fashn.ai/v1/status/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_status_url_rejects_bad_base() {
        let client = TryOnClient::with_client("not a url", "key", Client::new());
        let result = client.status_url(&JobHandle::new("abc").unwrap());
        assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    }
}
