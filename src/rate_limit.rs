//! Fixed-window rate limiting keyed by caller identity.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

use crate::error::AfriError;

/// Bucket shared by every caller without an identity.
pub const UNKNOWN_CALLER: &str = "unknown";

const DEFAULT_MAX_IDENTITIES: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
    /// Least-recently-seen identities are evicted past this bound.
    pub max_identities: NonZeroUsize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            max_requests: 20,
            max_identities: DEFAULT_MAX_IDENTITIES,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RateLimitRecord {
    count: u32,
    reset_at: Instant,
}

/// Process-wide fixed-window counter.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    records: Mutex<LruCache<String, RateLimitRecord>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let records = Mutex::new(LruCache::new(config.max_identities));
        Self { config, records }
    }

    pub const fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count one request for `caller`, rejecting it with `RATE_LIMIT` when the
    /// window is full.
    pub fn check(&self, caller: Option<&str>) -> Result<(), AfriError> {
        self.check_at(caller, Instant::now())
    }

    pub fn check_at(&self, caller: Option<&str>, now: Instant) -> Result<(), AfriError> {
        let key = caller
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_CALLER);
        let fresh = RateLimitRecord {
            count: 1,
            reset_at: now + self.config.window,
        };

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(record) = records.get_mut(key) else {
            // A full table gives up elapsed windows before evicting a live one.
            if records.len() >= records.cap().get() {
                sweep_locked(&mut records, now);
            }
            records.put(key.to_string(), fresh);
            return Ok(());
        };

        if now > record.reset_at {
            *record = fresh;
            return Ok(());
        }
        if record.count >= self.config.max_requests {
            tracing::warn!(
                caller = key,
                limit = self.config.max_requests,
                "rate limit exceeded"
            );
            return Err(AfriError::RateLimit(format!(
                "Please slow down. Limit is {} requests per {} seconds.",
                self.config.max_requests,
                self.config.window.as_secs()
            )));
        }
        record.count += 1;
        Ok(())
    }

    /// Drop records whose window has already elapsed. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    pub fn sweep_expired_at(&self, now: Instant) -> usize {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        sweep_locked(&mut records, now)
    }

    /// Number of tracked identities.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sweep_locked(records: &mut LruCache<String, RateLimitRecord>, now: Instant) -> usize {
    let expired: Vec<String> = records
        .iter()
        .filter(|(_, record)| now > record.reset_at)
        .map(|(key, _)| key.clone())
        .collect();
    for key in &expired {
        records.pop(key);
    }
    if !expired.is_empty() {
        tracing::debug!(removed = expired.len(), "swept expired rate-limit windows");
    }
    expired.len()
}

/// Caller identity from an `Authorization: Bearer <token>` value.
pub fn caller_identity(authorization: Option<&str>) -> Option<&str> {
    let mut parts = authorization?.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn allows_twenty_then_rejects_until_window_resets() {
        let limiter = RateLimiter::default();
        for _ in 0..20 {
            assert!(limiter.check(Some("key-a")).is_ok());
        }
        let err = limiter.check(Some("key-a")).unwrap_err();
        assert_eq!(err.status_code(), 429);

        // Other callers are unaffected.
        assert!(limiter.check(Some("key-b")).is_ok());

        // Exactly at the reset instant the window is still closed.
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(limiter.check(Some("key-a")).is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(limiter.check(Some("key-a")).is_ok());
        for _ in 0..19 {
            assert!(limiter.check(Some("key-a")).is_ok());
        }
        assert!(limiter.check(Some("key-a")).is_err());
    }

    #[test]
    fn absent_identity_shares_unknown_bucket() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 2,
            ..Default::default()
        });
        let now = Instant::now();
        assert!(limiter.check_at(None, now).is_ok());
        assert!(limiter.check_at(Some("  "), now).is_ok());
        assert!(limiter.check_at(None, now).is_err());
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn table_is_bounded_by_identity_count() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_identities: NonZeroUsize::new(2).unwrap(),
            ..Default::default()
        });
        let now = Instant::now();
        for caller in ["a", "b", "c"] {
            limiter.check_at(Some(caller), now).unwrap();
        }
        assert_eq!(limiter.len(), 2);
    }

    #[test]
    fn sweep_removes_only_elapsed_windows() {
        let limiter = RateLimiter::default();
        let start = Instant::now();
        limiter.check_at(Some("old"), start).unwrap();
        limiter
            .check_at(Some("new"), start + Duration::from_secs(30))
            .unwrap();

        let removed = limiter.sweep_expired_at(start + Duration::from_secs(61));
        assert_eq!(removed, 1);
        assert_eq!(limiter.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_uses_the_current_time() {
        let limiter = RateLimiter::default();
        limiter.check(Some("a")).unwrap();
        assert_eq!(limiter.sweep_expired(), 0);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(limiter.sweep_expired(), 1);
        assert!(limiter.is_empty());
    }

    #[test]
    fn full_table_drops_elapsed_windows_before_live_ones() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 1,
            max_identities: NonZeroUsize::new(2).unwrap(),
            ..Default::default()
        });
        let start = Instant::now();
        limiter.check_at(Some("live"), start + Duration::from_secs(30)).unwrap();
        limiter.check_at(Some("stale"), start).unwrap();

        // "live" is least recently used, but only "stale" has elapsed.
        limiter
            .check_at(Some("newcomer"), start + Duration::from_secs(61))
            .unwrap();
        assert_eq!(limiter.len(), 2);
        assert!(
            limiter
                .check_at(Some("live"), start + Duration::from_secs(62))
                .is_err()
        );
    }

    #[test]
    fn bearer_token_is_the_identity() {
        assert_eq!(caller_identity(Some("Bearer abc123")), Some("abc123"));
        assert_eq!(caller_identity(Some("bearer   xyz")), Some("xyz"));
        assert_eq!(caller_identity(Some("Basic abc")), None);
        assert_eq!(caller_identity(Some("Bearer")), None);
        assert_eq!(caller_identity(None), None);
    }
}
