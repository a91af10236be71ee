//! Retry with linear backoff.
//!
//! A failed call is re-issued up to a fixed number of total attempts,
//! waiting `base_delay * attempt_index` between attempts (1x, 2x, ...).
//! Failures carrying a status in [400, 500) are non-transient and
//! re-raise immediately. No jitter, no delay cap, no circuit breaker.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::ApiError;

/// Default total attempts.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts.
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Policy for retrying failed API calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum total attempts (including the first).
    pub max_attempts: u32,
    /// Base delay; attempt `n` waits `n * base_delay` before retrying.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and default delay.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Returns the delay before the retry following attempt `attempt`
    /// (1-based).
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Runs `op`, retrying transient failures per this policy.
    ///
    /// # Errors
    ///
    /// Surfaces the first client-error failure immediately, or the last
    /// failure once the attempt budget is exhausted.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= self.max_attempts || err.is_client_error() {
                        return Err(err);
                    }
                    let delay = self.delay_after_attempt(attempt);
                    warn!(
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(3).with_base_delay(Duration::from_millis(1))
    }

    #[test]
    fn backoff_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_after_attempt(3), Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn transient_failures_are_retried_to_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result = fast_policy()
            .run(|| {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(ApiError::from_status(500, None))
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_fail_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), _> = fast_policy()
            .run(|| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::from_status(404, None))
                }
            })
            .await;

        assert!(matches!(result, Err(ApiError::NotFound)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhaustion_surfaces_last_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), _> = fast_policy()
            .run(|| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::Network("unreachable".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(ApiError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn rate_limit_is_not_retried() {
        // 429 sits inside [400, 500): treated as non-transient like the
        // other client errors.
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), _> = fast_policy()
            .run(|| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::from_status(429, None))
                }
            })
            .await;

        assert!(matches!(result, Err(ApiError::RateLimited)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
