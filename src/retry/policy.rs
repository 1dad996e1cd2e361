//! Retry Mechanism Module
//!
//! Exponential backoff with additive jitter around any fallible async
//! operation. The n-th retry waits `base_delay * 2^(n-1) + jitter`, where
//! jitter is drawn uniformly from `0..=max_jitter`.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use super::classify::{RetryClass, Retryable};
use crate::utils::cancel::CancelHandle;

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts are `max_retries + 1`.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound of the random jitter added to each delay.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum retries
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set base delay
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set jitter upper bound
    pub const fn with_max_jitter(mut self, jitter: Duration) -> Self {
        self.max_jitter = jitter;
        self
    }

    /// Disable jitter (deterministic delays)
    pub const fn without_jitter(mut self) -> Self {
        self.max_jitter = Duration::ZERO;
        self
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Backoff delay before the given retry (1-based), without jitter.
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Backoff delay plus random jitter.
    pub fn calculate_delay(&self, retry: u32) -> Duration {
        let delay = self.backoff_delay(retry);
        if self.max_jitter.is_zero() {
            return delay;
        }
        let jitter_ms = rand::thread_rng().gen_range(0..=self.max_jitter.as_millis() as u64);
        delay.saturating_add(Duration::from_millis(jitter_ms))
    }
}

/// Retry executor that handles the actual retry logic
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create a new retry executor
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute a function with retry logic.
    ///
    /// Non-retryable errors are returned unmodified; when retries are
    /// exhausted the last error is returned.
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable,
    {
        let mut retries = 0u32;
        loop {
            let error = match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };

            match self.next_delay(&error, retries) {
                Some(delay) => {
                    retries += 1;
                    sleep(delay).await;
                }
                None => return Err(error),
            }
        }
    }

    /// Like [`execute`](Self::execute), but stops as soon as `cancel` fires,
    /// whether an attempt or a backoff sleep is in progress.
    pub async fn execute_cancellable<F, Fut, T, E>(
        &self,
        cancel: &CancelHandle,
        mut operation: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable,
    {
        let mut retries = 0u32;
        loop {
            if cancel.is_cancelled() {
                return Err(E::cancelled());
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(E::cancelled()),
                outcome = operation() => outcome,
            };
            let error = match outcome {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };

            match self.next_delay(&error, retries) {
                Some(delay) => {
                    retries += 1;
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(E::cancelled()),
                        _ = sleep(delay) => {}
                    }
                }
                None => return Err(error),
            }
        }
    }

    /// Delay before the next attempt, or `None` when the error must surface.
    fn next_delay<E: Retryable>(&self, error: &E, retries_so_far: u32) -> Option<Duration> {
        match error.retry_class() {
            RetryClass::Aborted | RetryClass::Fatal => return None,
            RetryClass::Transient => {}
        }
        if retries_so_far >= self.policy.max_retries {
            tracing::warn!(
                attempts = retries_so_far + 1,
                error = %error,
                "retries exhausted"
            );
            return None;
        }

        let attempt = retries_so_far + 1;
        let delay = self.policy.calculate_delay(attempt);
        tracing::warn!(
            attempt,
            max_retries = self.policy.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "transient error encountered, retrying"
        );
        Some(delay)
    }
}
