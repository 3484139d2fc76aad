//! Fitcheck CLI
//!
//! Command-line interface for the try-on, outfit analysis and shopping
//! services, driving the remote APIs directly.

mod commands;
mod config;
mod images;

use anyhow::{Result, bail};
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use fitcheck_client::{
    DEFAULT_SHOPPING_URL, DEFAULT_TRYON_URL, DEFAULT_VISION_MODEL, DEFAULT_VISION_URL,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fitcheck")]
#[command(about = "Outfit try-on, rating and shopping CLI", long_about = None)]
struct Cli {
    /// Try-on API key
    #[arg(long, env = "FASHN_API_KEY", hide_env_values = true, global = true)]
    fashn_api_key: Option<String>,

    /// Try-on API URL
    #[arg(long, env = "FASHN_BASE_URL", default_value = DEFAULT_TRYON_URL, global = true)]
    fashn_base_url: String,

    /// Vision API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    openai_api_key: Option<String>,

    /// Vision API URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_VISION_URL, global = true)]
    openai_base_url: String,

    /// Vision model
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_VISION_MODEL, global = true)]
    openai_model: String,

    /// Shopping search API key
    #[arg(long, env = "SERP_API_KEY", hide_env_values = true, global = true)]
    serp_api_key: Option<String>,

    /// Shopping search API URL
    #[arg(long, env = "SERP_BASE_URL", default_value = DEFAULT_SHOPPING_URL, global = true)]
    serp_base_url: String,

    /// Timeout in seconds for submit, analysis and search requests
    #[arg(long, env = "FITCHECK_TIMEOUT_SECS", default_value_t = 60, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default; RUST_LOG=fitcheck_client=debug shows every status query
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    if cli.timeout_secs == 0 {
        bail!("--timeout-secs must be greater than 0");
    }

    let config = Config {
        fashn_api_key: cli.fashn_api_key,
        fashn_base_url: cli.fashn_base_url,
        openai_api_key: cli.openai_api_key,
        openai_base_url: cli.openai_base_url,
        openai_model: cli.openai_model,
        serp_api_key: cli.serp_api_key,
        serp_base_url: cli.serp_base_url,
        request_timeout: Duration::from_secs(cli.timeout_secs),
    };

    handle_command(cli.command, &config).await
}
