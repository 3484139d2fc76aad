//! Job poller
//!
//! Waits for a submitted try-on job to reach a terminal state by querying its
//! status at a bounded cadence.
//!
//! One poll loop owns one [`JobHandle`] and issues its status queries strictly
//! one after another. Transport faults are absorbed and retried within the
//! attempt budget; remote failures, malformed completions and vanished jobs
//! end the loop at once. The loop suspends only on the status call and on the
//! delay between attempts, and stops at either point when its future is
//! dropped or its [`CancellationToken`] fires. The remote job itself is never
//! cancelled.

use async_trait::async_trait;
use fitcheck_core::domain::tryon::{JobHandle, JobStatus, StatusReport};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::Result as ClientResult;

/// Remote endpoint reporting the status of a job
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches one status observation for `handle`
    async fn fetch_status(&self, handle: &JobHandle) -> ClientResult<StatusReport>;
}

#[async_trait]
impl<T: StatusSource + ?Sized> StatusSource for Arc<T> {
    async fn fetch_status(&self, handle: &JobHandle) -> ClientResult<StatusReport> {
        (**self).fetch_status(handle).await
    }
}

/// Terminal outcomes of a poll loop other than success
#[derive(Debug, Error)]
pub enum PollError {
    /// The remote service reported the job as failed
    #[error("Processing failed: {0}")]
    RemoteFailure(String),

    /// The attempt budget ran out before the job finished
    #[error("Timeout waiting for result after {attempts} attempt(s)")]
    Timeout {
        attempts: u32,
        /// Last transient fault seen, kept for diagnosis
        last_error: Option<String>,
    },

    /// The job completed but the payload carries no usable result
    #[error("Job {handle} completed without a result reference")]
    MalformedResult { handle: JobHandle, payload: String },

    /// The remote side no longer knows the handle
    #[error("Job {0} not found")]
    NotFound(JobHandle),

    /// The caller stopped watching the job
    #[error("Polling cancelled")]
    Cancelled,
}

/// Delay policy between two status queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Always wait the configured interval
    Fixed,
    /// Multiply the interval after every attempt, never exceeding `max_delay`
    Exponential { multiplier: u32, max_delay: Duration },
}

/// Poll loop parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Upper bound on the number of status queries
    pub max_attempts: u32,
    /// Base delay between two queries
    pub interval: Duration,
    pub backoff: Backoff,
    /// Bound on a single status query, separate from the overall budget
    pub request_timeout: Duration,
    /// Consecutive not-found answers after which the handle is declared gone
    pub not_found_threshold: u32,
}

impl PollConfig {
    /// Fixed-interval polling with default per-request bounds
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            ..Self::default()
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_not_found_threshold(mut self, threshold: u32) -> Self {
        self.not_found_threshold = threshold;
        self
    }

    /// Delay applied after the 0-based `attempt` when another one follows
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential {
                multiplier,
                max_delay,
            } => {
                let factor = multiplier.checked_pow(attempt).unwrap_or(u32::MAX);
                self.interval
                    .checked_mul(factor)
                    .unwrap_or(max_delay)
                    .min(max_delay)
            }
        }
    }

    /// Upper bound on the time spent sleeping between attempts
    ///
    /// No delay follows the last attempt, so only `max_attempts - 1` delays count.
    /// Saturates at [`Duration::MAX`].
    pub fn max_total_wait(&self) -> Duration {
        let delays = self.max_attempts.saturating_sub(1);
        let mut total = Duration::ZERO;

        for attempt in 0..delays {
            let delay = self.delay_after(attempt);
            // Once two consecutive delays match, every later one does too
            if delay == self.delay_after(attempt.saturating_add(1)) {
                let rest = delay.checked_mul(delays - attempt).unwrap_or(Duration::MAX);
                return total.saturating_add(rest);
            }
            total = total.saturating_add(delay);
        }

        total
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(2),
            backoff: Backoff::Fixed,
            request_timeout: Duration::from_secs(5),
            not_found_threshold: 2,
        }
    }
}

/// Waits for try-on jobs to finish
///
/// Holds no per-loop state, so one poller can watch any number of jobs
/// concurrently.
#[derive(Debug, Clone)]
pub struct JobPoller<S> {
    source: S,
    config: PollConfig,
}

impl<S: StatusSource> JobPoller<S> {
    pub fn new(source: S, config: PollConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Polls `handle` until it completes, fails, or the budget runs out
    ///
    /// Returns the result reference of a completed job.
    pub async fn await_completion(&self, handle: &JobHandle) -> Result<String, PollError> {
        poll_loop(&self.source, &self.config, handle, None).await
    }

    /// Same as [`await_completion`](Self::await_completion), stopping with
    /// [`PollError::Cancelled`] as soon as `cancel` fires
    pub async fn await_completion_until(
        &self,
        handle: &JobHandle,
        cancel: &CancellationToken,
    ) -> Result<String, PollError> {
        poll_loop(&self.source, &self.config, handle, Some(cancel)).await
    }
}

/// Polls `handle` at a fixed `interval`, at most `max_attempts` times
pub async fn await_completion<S: StatusSource + ?Sized>(
    source: &S,
    handle: &JobHandle,
    max_attempts: u32,
    interval: Duration,
) -> Result<String, PollError> {
    let config = PollConfig::new(max_attempts, interval);
    poll_loop(source, &config, handle, None).await
}

async fn poll_loop<S: StatusSource + ?Sized>(
    source: &S,
    config: &PollConfig,
    handle: &JobHandle,
    cancel: Option<&CancellationToken>,
) -> Result<String, PollError> {
    let not_found_threshold = config.not_found_threshold.max(1);
    let mut not_found_run = 0;
    let mut last_error: Option<String> = None;

    info!(
        job_id = %handle,
        max_attempts = config.max_attempts,
        "Polling for try-on result"
    );

    for attempt in 0..config.max_attempts {
        if attempt > 0 {
            let delay = config.delay_after(attempt - 1);
            debug!(job_id = %handle, attempt, ?delay, "Waiting before next status query");
            suspend(time::sleep(delay), cancel).await?;
        }

        let observation = suspend(
            time::timeout(config.request_timeout, source.fetch_status(handle)),
            cancel,
        )
        .await?;

        match observation {
            Err(_) => {
                not_found_run = 0;
                warn!(
                    job_id = %handle,
                    attempt,
                    timeout = ?config.request_timeout,
                    "Status query timed out"
                );
                last_error = Some(format!(
                    "Status query timed out after {:?}",
                    config.request_timeout
                ));
            }
            Ok(Err(err)) if err.is_not_found() => {
                not_found_run += 1;
                if not_found_run >= not_found_threshold {
                    warn!(job_id = %handle, attempt, "Job not found by remote service");
                    return Err(PollError::NotFound(handle.clone()));
                }
                warn!(job_id = %handle, attempt, "Status check failed: {}", err);
                last_error = Some(err.to_string());
            }
            Ok(Err(err)) => {
                not_found_run = 0;
                warn!(job_id = %handle, attempt, "Status check failed: {}", err);
                last_error = Some(err.to_string());
            }
            Ok(Ok(report)) if !report.status.is_terminal() => {
                not_found_run = 0;
                debug!(job_id = %handle, attempt, status = %report.status, "Job still running");
            }
            Ok(Ok(report)) if report.status == JobStatus::Failed => {
                let message = report
                    .error_message()
                    .unwrap_or_else(|| "Unknown error".to_string());
                info!(job_id = %handle, "Try-on job failed: {}", message);
                return Err(PollError::RemoteFailure(message));
            }
            Ok(Ok(report)) => {
                return match report.result_reference() {
                    Some(result) => {
                        info!(job_id = %handle, attempts = attempt + 1, "Try-on job completed");
                        Ok(result.to_string())
                    }
                    None => Err(PollError::MalformedResult {
                        handle: handle.clone(),
                        payload: serde_json::to_string(&report)
                            .unwrap_or_else(|_| format!("{:?}", report)),
                    }),
                };
            }
        }
    }

    Err(PollError::Timeout {
        attempts: config.max_attempts,
        last_error,
    })
}

/// Awaits `fut`, giving up early if `cancel` fires first
async fn suspend<F: Future>(
    fut: F,
    cancel: Option<&CancellationToken>,
) -> Result<F::Output, PollError> {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(PollError::Cancelled),
            out = fut => Ok(out),
        },
        None => Ok(fut.await),
    }
}
