//! Virtual try-on domain types
//!
//! A try-on render is a remote asynchronous job: it is submitted once,
//! identified by a [`JobHandle`], and observed through [`StatusReport`]s
//! until it reaches a terminal [`JobStatus`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a submitted try-on job
///
/// Always non-empty. Issued by the remote service on submission and used as
/// the key of every later status query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    /// Wraps a remote job id, rejecting empty or blank ids
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remote job status
///
/// Only `Completed` and `Failed` are terminal. Tags the remote side may add
/// later land in `Unknown` and are polled like `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Starting,
    InQueue,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether no further transition can happen from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            JobStatus::Pending => "pending",
            JobStatus::Starting => "starting",
            JobStatus::InQueue => "in_queue",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        };
        f.write_str(tag)
    }
}

/// Error reported by the remote side for a failed job
///
/// Older API revisions send a bare string, newer ones an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteError {
    Message(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

impl RemoteError {
    pub fn message(&self) -> Option<String> {
        match self {
            RemoteError::Message(msg) if !msg.is_empty() => Some(msg.clone()),
            RemoteError::Message(_) => None,
            RemoteError::Detailed { name, message } => match (name, message) {
                (Some(name), Some(message)) => Some(format!("{}: {}", name, message)),
                (None, Some(message)) => Some(message.clone()),
                (Some(name), None) => Some(name.clone()),
                (None, None) => None,
            },
        }
    }
}

/// One observation of a job's status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub id: Option<String>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RemoteError>,
}

impl StatusReport {
    /// Creates a report with only a status set
    pub fn with_status(status: JobStatus) -> Self {
        Self {
            id: None,
            status,
            result_url: None,
            output: None,
            error: None,
        }
    }

    /// Creates a completed report carrying a result URL
    pub fn completed(result_url: impl Into<String>) -> Self {
        Self {
            result_url: Some(result_url.into()),
            ..Self::with_status(JobStatus::Completed)
        }
    }

    /// Creates a failed report carrying the remote error message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(RemoteError::Message(message.into())),
            ..Self::with_status(JobStatus::Failed)
        }
    }

    /// Reference to the produced artifact, if the payload carries a usable one
    ///
    /// `result_url` wins over `output`; blank values do not count.
    pub fn result_reference(&self) -> Option<&str> {
        self.result_url
            .as_deref()
            .or_else(|| self.output.as_ref().and_then(|o| o.first()).map(String::as_str))
            .filter(|url| !url.trim().is_empty())
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().and_then(RemoteError::message)
    }
}

/// Garment category understood by the try-on model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Tops,
    Bottoms,
    OnePieces,
    Auto,
}

/// Speed/quality trade-off of the try-on render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Performance,
    #[default]
    Balanced,
    Quality,
}

/// Try-on submission
///
/// Images are URLs or base64 data URLs; the remote accepts both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryOnRequest {
    pub model_image: String,
    pub garment_image: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub mode: Mode,
}

impl TryOnRequest {
    pub fn new(model_image: impl Into<String>, garment_image: impl Into<String>) -> Self {
        Self {
            model_image: model_image.into(),
            garment_image: garment_image.into(),
            category: Category::default(),
            mode: Mode::default(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}
