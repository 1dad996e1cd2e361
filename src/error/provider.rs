//! Upstream provider failures.
//!
//! Providers report what went wrong on the wire; the classifier decides what it
//! means for the caller.

use thiserror::Error;

/// Number of body characters kept when building status errors.
const BODY_SAMPLE_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("http {status}: {message}")]
    Status { status: u16, message: String },

    #[error("connection reset: {0}")]
    ConnectionReset(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request aborted")]
    Aborted,

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Build a status error from a non-success response, keeping a short body sample.
    pub fn from_status(status: u16, body: &str) -> Self {
        let sample: String = body.chars().take(BODY_SAMPLE_CHARS).collect();
        let message = if sample.trim().is_empty() {
            "api error".to_string()
        } else {
            sample
        };
        Self::Status { status, message }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Rate limits, server errors and dropped connections are worth retrying.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || (*status >= 500 && *status <= 599),
            Self::ConnectionReset(_) | Self::Timeout(_) => true,
            _ => false,
        }
    }
}
