//! Server configuration
//!
//! Defines the bind address, the remote service credentials and the try-on
//! polling budget. Every remote service is optional: a missing API key turns
//! the matching endpoint into a "not configured" error instead of failing
//! startup.

use fitcheck_client::{
    Backoff, DEFAULT_SHOPPING_URL, DEFAULT_TRYON_URL, DEFAULT_VISION_MODEL, DEFAULT_VISION_URL,
    PollConfig,
};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// Try-on API key; try-on is disabled without it
    pub fashn_api_key: Option<String>,
    pub fashn_base_url: String,

    /// Chat-completions API key; outfit analysis is disabled without it
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,

    /// Shopping search API key; shopping search is disabled without it
    pub serp_api_key: Option<String>,
    pub serp_base_url: String,
    /// Number of shopping results returned per search
    pub shopping_results: usize,
    /// Steer shopping queries towards menswear
    pub shopping_menswear: bool,

    /// Maximum number of status queries per try-on job
    pub poll_max_attempts: u32,
    /// Delay between two status queries
    pub poll_interval: Duration,
    /// When set, the delay doubles after each attempt up to this cap
    pub poll_max_backoff: Option<Duration>,
    /// Bound on a single status query
    pub status_timeout: Duration,
    /// Consecutive 404s after which a job is considered gone
    pub not_found_threshold: u32,

    /// Bound on submit, analysis and search calls
    pub upstream_timeout: Duration,

    /// Maximum accepted request body (images arrive as data URLs)
    pub max_body_bytes: usize,
}

impl Config {
    /// Creates a configuration with defaults and no remote services
    pub fn new(bind_addr: String) -> Self {
        Self {
            bind_addr,
            fashn_api_key: None,
            fashn_base_url: DEFAULT_TRYON_URL.to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_VISION_URL.to_string(),
            openai_model: DEFAULT_VISION_MODEL.to_string(),
            serp_api_key: None,
            serp_base_url: DEFAULT_SHOPPING_URL.to_string(),
            shopping_results: 5,
            shopping_menswear: true,
            poll_max_attempts: 30,
            poll_interval: Duration::from_secs(2),
            poll_max_backoff: None,
            status_timeout: Duration::from_secs(5),
            not_found_threshold: 2,
            upstream_timeout: Duration::from_secs(60),
            max_body_bytes: 20 * 1024 * 1024,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - FITCHECK_BIND_ADDR (default: 0.0.0.0:8080)
    /// - FASHN_API_KEY, FASHN_BASE_URL
    /// - OPENAI_API_KEY, OPENAI_BASE_URL, OPENAI_MODEL (default: gpt-4o-mini)
    /// - SERP_API_KEY, SERP_BASE_URL
    /// - SHOPPING_RESULTS (default: 5)
    /// - SHOPPING_MENSWEAR (default: true)
    /// - TRYON_MAX_ATTEMPTS (default: 30)
    /// - TRYON_POLL_INTERVAL_MS (default: 2000)
    /// - TRYON_MAX_BACKOFF_MS (unset: fixed interval)
    /// - TRYON_STATUS_TIMEOUT_SECS (default: 5)
    /// - TRYON_NOT_FOUND_THRESHOLD (default: 2)
    /// - UPSTREAM_TIMEOUT_SECS (default: 60)
    /// - MAX_BODY_BYTES (default: 20 MiB)
    pub fn from_env() -> Self {
        let defaults = Self::new(
            env_string("FITCHECK_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
        );

        Self {
            fashn_api_key: env_string("FASHN_API_KEY"),
            fashn_base_url: env_string("FASHN_BASE_URL").unwrap_or(defaults.fashn_base_url),
            openai_api_key: env_string("OPENAI_API_KEY"),
            openai_base_url: env_string("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: env_string("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            serp_api_key: env_string("SERP_API_KEY"),
            serp_base_url: env_string("SERP_BASE_URL").unwrap_or(defaults.serp_base_url),
            shopping_results: env_parse("SHOPPING_RESULTS").unwrap_or(defaults.shopping_results),
            shopping_menswear: env_parse("SHOPPING_MENSWEAR")
                .unwrap_or(defaults.shopping_menswear),
            poll_max_attempts: env_parse("TRYON_MAX_ATTEMPTS")
                .unwrap_or(defaults.poll_max_attempts),
            poll_interval: env_parse("TRYON_POLL_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            poll_max_backoff: env_parse("TRYON_MAX_BACKOFF_MS").map(Duration::from_millis),
            status_timeout: env_parse("TRYON_STATUS_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.status_timeout),
            not_found_threshold: env_parse("TRYON_NOT_FOUND_THRESHOLD")
                .unwrap_or(defaults.not_found_threshold),
            upstream_timeout: env_parse("UPSTREAM_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            ..defaults
        }
    }

    /// Poll loop parameters for try-on jobs
    pub fn poll_config(&self) -> PollConfig {
        let config = PollConfig::new(self.poll_max_attempts, self.poll_interval)
            .with_request_timeout(self.status_timeout)
            .with_not_found_threshold(self.not_found_threshold);

        match self.poll_max_backoff {
            Some(max_delay) => config.with_backoff(Backoff::Exponential {
                multiplier: 2,
                max_delay,
            }),
            None => config,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        for (name, url) in [
            ("fashn_base_url", &self.fashn_base_url),
            ("openai_base_url", &self.openai_base_url),
            ("serp_base_url", &self.serp_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.poll_max_attempts == 0 {
            anyhow::bail!("poll_max_attempts must be greater than 0");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.poll_max_backoff.is_some_and(|cap| cap < self.poll_interval) {
            anyhow::bail!("poll_max_backoff cannot be shorter than poll_interval");
        }

        if self.status_timeout.is_zero() || self.upstream_timeout.is_zero() {
            anyhow::bail!("timeouts must be greater than 0");
        }

        if self.shopping_results == 0 {
            anyhow::bail!("shopping_results must be greater than 0");
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("0.0.0.0:8080".to_string())
    }
}

/// Reads a variable, treating empty values as unset
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|s| s.trim().parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_max_attempts, 30);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.shopping_results, 5);
        assert!(config.fashn_api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.poll_max_attempts = 0;
        assert!(config.validate().is_err());
        config.poll_max_attempts = 30;

        config.fashn_base_url = "api.fashn.ai".to_string();
        assert!(config.validate().is_err());
        config.fashn_base_url = DEFAULT_TRYON_URL.to_string();

        config.poll_max_backoff = Some(Duration::from_secs(1));
        assert!(config.validate().is_err());
        config.poll_max_backoff = Some(Duration::from_secs(10));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_poll_config() {
        let mut config = Config::default();
        let poll = config.poll_config();
        assert_eq!(poll.backoff, Backoff::Fixed);
        assert_eq!(poll.request_timeout, Duration::from_secs(5));
        assert_eq!(poll.max_total_wait(), Duration::from_secs(58));

        config.poll_max_backoff = Some(Duration::from_secs(8));
        assert_eq!(
            config.poll_config().backoff,
            Backoff::Exponential {
                multiplier: 2,
                max_delay: Duration::from_secs(8),
            }
        );
    }
}
