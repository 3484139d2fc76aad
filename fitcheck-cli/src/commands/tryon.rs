//! Try-on command handlers
//!
//! Submits a try-on job, then watches it until it finishes. Ctrl-C stops the
//! watch; the remote job keeps running and can be checked with `status`.

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use colored::*;
use fitcheck_client::{JobPoller, JobSubmitter, PollConfig, PollError};
use fitcheck_core::domain::tryon::{Category, JobHandle, JobStatus, Mode, TryOnRequest};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::images::resolve_image;

/// Garment category
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Tops,
    Bottoms,
    OnePieces,
    Auto,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Tops => Category::Tops,
            CategoryArg::Bottoms => Category::Bottoms,
            CategoryArg::OnePieces => Category::OnePieces,
            CategoryArg::Auto => Category::Auto,
        }
    }
}

/// Render mode
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Performance,
    Balanced,
    Quality,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Performance => Mode::Performance,
            ModeArg::Balanced => Mode::Balanced,
            ModeArg::Quality => Mode::Quality,
        }
    }
}

#[derive(Debug, Args)]
pub struct TryOnArgs {
    /// Photo of the person (URL or local file)
    #[arg(long)]
    pub model_image: String,

    /// Photo of the garment (URL or local file)
    #[arg(long)]
    pub garment_image: String,

    #[arg(long, value_enum, default_value_t = CategoryArg::Tops)]
    pub category: CategoryArg,

    #[arg(long, value_enum, default_value_t = ModeArg::Balanced)]
    pub mode: ModeArg,

    /// Maximum number of status queries
    #[arg(long, default_value_t = 30)]
    pub max_attempts: u32,

    /// Delay between status queries in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub interval_ms: u64,

    /// Bound on a single status query in seconds
    #[arg(long, default_value_t = 5)]
    pub status_timeout_secs: u64,
}

impl TryOnArgs {
    fn poll_config(&self) -> Result<PollConfig> {
        if self.max_attempts == 0 {
            bail!("--max-attempts must be greater than 0");
        }
        if self.interval_ms == 0 || self.status_timeout_secs == 0 {
            bail!("--interval-ms and --status-timeout-secs must be greater than 0");
        }

        Ok(
            PollConfig::new(self.max_attempts, Duration::from_millis(self.interval_ms))
                .with_request_timeout(Duration::from_secs(self.status_timeout_secs)),
        )
    }

    fn request(&self) -> Result<TryOnRequest> {
        let model = resolve_image(&self.model_image).context("Invalid --model-image")?;
        let garment = resolve_image(&self.garment_image).context("Invalid --garment-image")?;

        Ok(TryOnRequest::new(model, garment)
            .with_category(self.category.into())
            .with_mode(self.mode.into()))
    }
}

/// Submit a try-on job and wait for its result
pub async fn run_try_on(args: TryOnArgs, config: &Config) -> Result<()> {
    let poll_config = args.poll_config()?;
    let request = args.request()?;
    let client = config.tryon_client()?;

    let handle = client
        .submit(&request)
        .await
        .context("Failed to submit try-on job")?;

    println!("{}", "✓ Try-on job submitted".green().bold());
    println!("  ID:       {}", handle.as_str().cyan());
    println!(
        "  Waiting:  up to {} attempts, {:?} max",
        poll_config.max_attempts,
        poll_config.max_total_wait()
    );
    println!("{}", "  Press Ctrl-C to stop waiting".dimmed());

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            watcher.cancel();
        }
    });

    let poller = JobPoller::new(client, poll_config);
    let outcome = poller.await_completion_until(&handle, &cancel).await;
    cancel.cancel();

    match outcome {
        Ok(result) => {
            println!();
            println!("{}", "✓ Try-on completed!".green().bold());
            println!("  Result:   {}", result.cyan());
            Ok(())
        }
        Err(PollError::Cancelled) => {
            println!();
            println!("{}", "⚠ Stopped waiting; the job keeps running remotely".yellow());
            println!(
                "  Check it later with {}",
                format!("fitcheck status {}", handle).cyan()
            );
            Ok(())
        }
        Err(PollError::Timeout {
            attempts,
            last_error,
        }) => {
            println!();
            println!(
                "{}",
                format!("✗ No result after {} attempt(s)", attempts).red()
            );
            if let Some(error) = last_error {
                println!("  Last error: {}", error.dimmed());
            }
            bail!("Try-on timed out; check it later with `fitcheck status {}`", handle)
        }
        Err(e) => Err(e).context(format!("Try-on job {} did not complete", handle)),
    }
}

/// Query and display the status of a job once
pub async fn show_status(job_id: &str, json: bool, config: &Config) -> Result<()> {
    let handle = JobHandle::new(job_id).context("Job ID cannot be empty")?;
    let client = config.tryon_client()?;

    let report = client
        .status(&handle)
        .await
        .with_context(|| format!("Failed to query job {}", handle))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Try-on Job Details".bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("  ID:       {}", handle.as_str().cyan());
    println!("  Status:   {}", format_status(report.status));
    if let Some(result) = report.result_reference() {
        println!("  Result:   {}", result);
    }
    if let Some(error) = report.error_message() {
        println!("  Error:    {}", error.red());
    }
    println!("{}", "─".repeat(80).dimmed());

    Ok(())
}

fn format_status(status: JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Pending | JobStatus::Starting | JobStatus::InQueue => status_str.yellow(),
        JobStatus::Processing => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Unknown => status_str.dimmed(),
    }
}
