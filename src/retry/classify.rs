//! Retry classification for fallible operations.

use crate::error::{AfriError, ProviderError};

/// How the retry executor should treat a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Safe to retry after a backoff delay.
    Transient,
    /// Returned to the caller unmodified.
    Fatal,
    /// Caller cancelled; never retried regardless of other markers.
    Aborted,
}

/// Errors the retry executor knows how to classify.
pub trait Retryable: std::fmt::Display {
    fn retry_class(&self) -> RetryClass;

    /// The error reported when a cancellable execution is aborted.
    fn cancelled() -> Self
    where
        Self: Sized;
}

impl Retryable for ProviderError {
    fn retry_class(&self) -> RetryClass {
        if self.is_aborted() {
            RetryClass::Aborted
        } else if self.is_transient() {
            RetryClass::Transient
        } else {
            RetryClass::Fatal
        }
    }

    fn cancelled() -> Self {
        ProviderError::Aborted
    }
}

impl Retryable for AfriError {
    fn retry_class(&self) -> RetryClass {
        if self.is_cancelled() {
            RetryClass::Aborted
        } else if self.is_transient() {
            RetryClass::Transient
        } else {
            RetryClass::Fatal
        }
    }

    fn cancelled() -> Self {
        AfriError::cancelled()
    }
}
