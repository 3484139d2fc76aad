//! Shared handler state
//!
//! Remote clients are built once from [`Config`] and handed to every handler
//! through axum's `State`. Each service is optional so the server can run
//! with any subset of API keys.

use anyhow::{Context, Result};
use fitcheck_client::{
    JobPoller, JobSubmitter, OutfitAnalyzer, ShoppingClient, ShoppingProvider, StatusSource,
    TryOnClient, VisionClient,
};
use std::sync::Arc;

use crate::config::Config;

/// Submission side and polling side of the try-on service
#[derive(Clone)]
pub struct TryOnBackend {
    pub submitter: Arc<dyn JobSubmitter>,
    pub poller: Arc<JobPoller<Arc<dyn StatusSource>>>,
}

/// Shopping search together with its query policy
#[derive(Clone)]
pub struct ShoppingBackend {
    pub provider: Arc<dyn ShoppingProvider>,
    pub num_results: usize,
    pub menswear: bool,
}

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub tryon: Option<TryOnBackend>,
    pub analyzer: Option<Arc<dyn OutfitAnalyzer>>,
    pub shopping: Option<ShoppingBackend>,
}

impl AppState {
    /// Builds the remote clients for every service that has an API key
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let tryon = config.fashn_api_key.as_ref().map(|key| {
            let client = Arc::new(TryOnClient::with_client(
                config.fashn_base_url.clone(),
                key.clone(),
                http.clone(),
            ));
            let status: Arc<dyn StatusSource> = client.clone();
            TryOnBackend {
                submitter: client,
                poller: Arc::new(JobPoller::new(status, config.poll_config())),
            }
        });

        let analyzer = config.openai_api_key.as_ref().map(|key| {
            let client = VisionClient::with_client(
                config.openai_base_url.clone(),
                key.clone(),
                http.clone(),
            )
            .with_model(config.openai_model.clone());
            Arc::new(client) as Arc<dyn OutfitAnalyzer>
        });

        let shopping = config.serp_api_key.as_ref().map(|key| ShoppingBackend {
            provider: Arc::new(ShoppingClient::with_client(
                config.serp_base_url.clone(),
                key.clone(),
                http.clone(),
            )),
            num_results: config.shopping_results,
            menswear: config.shopping_menswear,
        });

        Ok(Self {
            tryon,
            analyzer,
            shopping,
        })
    }

    /// Names of the services that are configured, for the startup log
    pub fn enabled_services(&self) -> Vec<&'static str> {
        let mut services = Vec::new();
        if self.tryon.is_some() {
            services.push("try-on");
        }
        if self.analyzer.is_some() {
            services.push("analyze-outfit");
        }
        if self.shopping.is_some() {
            services.push("shopping-search");
        }
        services
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_follow_api_keys() {
        let mut config = Config::default();
        let state = AppState::from_config(&config).unwrap();
        assert!(state.enabled_services().is_empty());

        config.fashn_api_key = Some("fa-key".to_string());
        config.serp_api_key = Some("serp-key".to_string());
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.enabled_services(), vec!["try-on", "shopping-search"]);

        let tryon = state.tryon.unwrap();
        assert_eq!(tryon.poller.config().max_attempts, 30);
    }
}
