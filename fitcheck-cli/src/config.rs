//! Configuration module
//!
//! Remote service endpoints and credentials, resolved from flags or the
//! environment. Clients are only built for the service a command needs, so a
//! missing key only fails the commands that use it.

use anyhow::{Context, Result};
use fitcheck_client::{ShoppingClient, TryOnClient, VisionClient};
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub fashn_api_key: Option<String>,
    pub fashn_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub serp_api_key: Option<String>,
    pub serp_base_url: String,
    /// Bound on submit, analysis and search calls
    pub request_timeout: Duration,
}

impl Config {
    fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")
    }

    pub fn tryon_client(&self) -> Result<TryOnClient> {
        let key = self
            .fashn_api_key
            .as_deref()
            .context("Try-on API key not configured (set FASHN_API_KEY or --fashn-api-key)")?;

        Ok(TryOnClient::with_client(
            &self.fashn_base_url,
            key,
            self.http_client()?,
        ))
    }

    pub fn vision_client(&self) -> Result<VisionClient> {
        let key = self
            .openai_api_key
            .as_deref()
            .context("Vision API key not configured (set OPENAI_API_KEY or --openai-api-key)")?;

        Ok(
            VisionClient::with_client(&self.openai_base_url, key, self.http_client()?)
                .with_model(&self.openai_model),
        )
    }

    pub fn shopping_client(&self) -> Result<ShoppingClient> {
        let key = self
            .serp_api_key
            .as_deref()
            .context("Shopping API key not configured (set SERP_API_KEY or --serp-api-key)")?;

        Ok(ShoppingClient::with_client(
            &self.serp_base_url,
            key,
            self.http_client()?,
        ))
    }
}
