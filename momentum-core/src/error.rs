//! Structured error types for API access and payload ingestion.
//!
//! Messages are written to be shown verbatim in the TUI status bar and on the
//! CLI, so they carry the upstream wording (status code and reason) as-is.

use thiserror::Error;

/// Failure of a single request against the dashboard API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, reset.
    #[error("{0}")]
    Transport(String),

    /// Any non-2xx response.
    #[error("Server returned {code}: {reason}")]
    Status { code: u16, reason: String },

    /// The body was not the JSON we expected.
    #[error("invalid response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Transport(_) => ErrorCategory::Network,
            ApiError::Status { .. } => ErrorCategory::Http,
            ApiError::Decode(_) | ApiError::Ingest(_) => ErrorCategory::Data,
        }
    }
}

/// Error class shown in the error history. `Input` covers rejected form
/// values, which never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Http,
    Data,
    Input,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Http => "HTTP",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Input => "INPUT",
        }
    }
}

/// A structurally valid HTTP response whose JSON could not be turned into
/// domain types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    #[error("Could not retrieve momentum data. Please try again later.")]
    EmptyPayload,

    #[error("unexpected payload shape: {0}")]
    Shape(String),

    /// The body was an `{"error": ...}` object instead of a result.
    #[error("{0}")]
    Upstream(String),
}
