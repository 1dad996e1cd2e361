//! Application error taxonomy.
//!
//! `AfriError` is the only error type that crosses the orchestration boundary.
//! Every variant maps to exactly one stable `ErrorCode` and an HTTP-style status.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable, machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    InvalidConfig,
    AuthError,
    DetectionFailed,
    SafetyBlock,
    EmptyResponse,
    RateLimit,
    InternalError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::InvalidInput,
        ErrorCode::InvalidConfig,
        ErrorCode::AuthError,
        ErrorCode::DetectionFailed,
        ErrorCode::SafetyBlock,
        ErrorCode::EmptyResponse,
        ErrorCode::RateLimit,
        ErrorCode::InternalError,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::DetectionFailed => "DETECTION_FAILED",
            ErrorCode::SafetyBlock => "SAFETY_BLOCK",
            ErrorCode::EmptyResponse => "EMPTY_RESPONSE",
            ErrorCode::RateLimit => "RATE_LIMIT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Default status for the code. `AUTH_ERROR` may also surface as 403.
    pub const fn default_status(self) -> u16 {
        match self {
            ErrorCode::InvalidInput | ErrorCode::InvalidConfig => 400,
            ErrorCode::AuthError => 401,
            ErrorCode::DetectionFailed | ErrorCode::SafetyBlock => 422,
            ErrorCode::EmptyResponse => 502,
            ErrorCode::RateLimit => 429,
            ErrorCode::InternalError => 500,
        }
    }

    pub const fn category(self) -> ErrorCategory {
        match self {
            ErrorCode::InvalidInput | ErrorCode::InvalidConfig => ErrorCategory::Caller,
            ErrorCode::AuthError => ErrorCategory::Authentication,
            ErrorCode::DetectionFailed | ErrorCode::SafetyBlock => ErrorCategory::Policy,
            ErrorCode::RateLimit => ErrorCategory::RateLimit,
            ErrorCode::EmptyResponse => ErrorCategory::Upstream,
            ErrorCode::InternalError => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status classification of an error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller can fix the request.
    Caller,
    Authentication,
    /// The request was well-formed but rejected by policy.
    Policy,
    RateLimit,
    /// The provider answered but the answer was unusable.
    Upstream,
    Internal,
}

/// What kind of failure an `INTERNAL_ERROR` wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalKind {
    /// Unclassified failure; never retried.
    Unexpected,
    /// Server-class or connection failure upstream; safe to retry.
    Transient,
    /// The request was cancelled by the caller; never retried.
    Cancelled,
}

/// Application error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AfriError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("authentication failed: {message}")]
    AuthError { message: String, forbidden: bool },

    #[error("language detection failed: {0}")]
    DetectionFailed(String),

    #[error("message blocked by safety rules: {reason}")]
    SafetyBlock { reason: String },

    #[error("empty response: {0}")]
    EmptyResponse(String),

    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("internal error: {message}")]
    Internal { message: String, kind: InternalKind },
}

impl AfriError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthError {
            message: message.into(),
            forbidden: false,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::AuthError {
            message: message.into(),
            forbidden: true,
        }
    }

    pub fn safety_block(reason: impl Into<String>) -> Self {
        Self::SafetyBlock {
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            kind: InternalKind::Unexpected,
        }
    }

    /// Internal error explicitly tagged as transient (retryable).
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            kind: InternalKind::Transient,
        }
    }

    pub fn cancelled() -> Self {
        Self::Internal {
            message: "request cancelled".to_string(),
            kind: InternalKind::Cancelled,
        }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::AuthError { .. } => ErrorCode::AuthError,
            Self::DetectionFailed(_) => ErrorCode::DetectionFailed,
            Self::SafetyBlock { .. } => ErrorCode::SafetyBlock,
            Self::EmptyResponse(_) => ErrorCode::EmptyResponse,
            Self::RateLimit(_) => ErrorCode::RateLimit,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AuthError {
                forbidden: true, ..
            } => 403,
            other => other.code().default_status(),
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Human-readable message without the code prefix.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(m)
            | Self::InvalidConfig(m)
            | Self::DetectionFailed(m)
            | Self::EmptyResponse(m)
            | Self::RateLimit(m) => m.clone(),
            Self::AuthError { message, .. } | Self::Internal { message, .. } => message.clone(),
            Self::SafetyBlock { reason } => format!("Message blocked by safety rules: {reason}"),
        }
    }

    /// Rate limits and transient internal failures may be retried.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimit(_)
                | Self::Internal {
                    kind: InternalKind::Transient,
                    ..
                }
        )
    }

    pub const fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Internal {
                kind: InternalKind::Cancelled,
                ..
            }
        )
    }

    /// Structured `{ error, message }` body for the transport layer.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code(),
            message: self.message(),
        }
    }
}

/// Error surface handed to callers: `{ "error": <code>, "message": <string> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorCode,
    pub message: String,
}

impl From<&AfriError> for ErrorBody {
    fn from(err: &AfriError) -> Self {
        err.to_body()
    }
}
