//! Rate-limit retry loop for SendGrid operations.
//!
//! Only HTTP 429 responses are retried. Every other error ends the loop
//! immediately, and the whole loop is bounded by the operation timeout.

use crate::config::RetryConfig;
use crate::errors::{SendGridError, SendGridErrorKind, SendGridResult};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};

/// States of a single retried operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// The operation is running.
    Attempting,
    /// A 429 was seen and the next attempt is waiting for its backoff.
    RetryScheduled,
    /// The operation succeeded.
    Succeeded,
    /// The operation failed with a non-retryable error or ran out of time.
    FailedTerminal,
}

impl fmt::Display for RetryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attempting => write!(f, "attempting"),
            Self::RetryScheduled => write!(f, "retry_scheduled"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::FailedTerminal => write!(f, "failed_terminal"),
        }
    }
}

/// Retry policy keyed off rate-limit responses.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    initial_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
    enabled: bool,
}

impl RetryPolicy {
    /// Creates a new retry policy.
    pub fn new(initial_backoff: Duration, max_backoff: Duration, multiplier: f64) -> Self {
        Self {
            initial_backoff,
            max_backoff,
            multiplier,
            enabled: true,
        }
    }

    /// Creates a policy from configuration.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            initial_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier,
            enabled: config.enabled,
        }
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or `timeout` elapses.
    ///
    /// Each attempt is a full re-invocation of `operation`. An attempt still
    /// in flight when the deadline passes is dropped, which cancels its
    /// HTTP request. Backoff is capped at half the time left, and
    /// `DeadlineExceeded` is only returned once the deadline has passed.
    pub async fn execute<F, Fut, T>(
        &self,
        timeout: Duration,
        mut operation: F,
    ) -> SendGridResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SendGridResult<T>>,
    {
        let deadline = Instant::now() + timeout;
        let mut attempt: u32 = 0;
        let mut last_error: Option<SendGridError> = None;

        loop {
            attempt += 1;
            tracing::trace!(attempt, state = %RetryState::Attempting, "Running operation");

            let outcome = match timeout_at(deadline, operation()).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!(
                        attempt,
                        state = %RetryState::FailedTerminal,
                        "Operation deadline elapsed"
                    );
                    return Err(Self::deadline_error(timeout, last_error));
                }
            };

            let error = match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(
                            attempt,
                            state = %RetryState::Succeeded,
                            "Operation succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(e) => e,
            };

            if !self.enabled || !error.is_retryable() {
                tracing::debug!(
                    attempt,
                    state = %RetryState::FailedTerminal,
                    error = %error,
                    "Operation failed"
                );
                return Err(error);
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(
                    attempt,
                    state = %RetryState::FailedTerminal,
                    "Operation deadline elapsed"
                );
                return Err(Self::deadline_error(timeout, Some(error)));
            }
            let delay = self.delay_for(attempt, &error).min((deadline - now) / 2);

            tracing::warn!(
                attempt = attempt,
                delay_ms = delay.as_millis() as u64,
                state = %RetryState::RetryScheduled,
                error = %error,
                "Rate limited, retrying"
            );

            sleep(delay).await;
            last_error = Some(error);
        }
    }

    /// Computes the wait before the next attempt.
    ///
    /// A future reset time from the rate-limit headers wins over the
    /// exponential schedule; both are capped at the max backoff.
    pub fn delay_for(&self, attempt: u32, error: &SendGridError) -> Duration {
        if let Some(until_reset) = error.reset_after().filter(|d| !d.is_zero()) {
            return until_reset.min(self.max_backoff);
        }
        self.calculate_backoff(attempt)
    }

    /// Calculates exponential backoff for the given (1-based) attempt.
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32) as i32;
        let base = self.initial_backoff.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = base.min(self.max_backoff.as_secs_f64());
        Duration::from_secs_f64(capped.max(0.0))
    }

    fn deadline_error(timeout: Duration, last_error: Option<SendGridError>) -> SendGridError {
        let error = SendGridError::new(
            SendGridErrorKind::DeadlineExceeded,
            format!("operation canceled or timed out after {:?}", timeout),
        );
        match last_error {
            Some(cause) => {
                let status = cause.status_code();
                let error = error.with_cause(cause);
                match status {
                    Some(code) => error.with_status(code),
                    None => error,
                }
            }
            None => error,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RateLimitInfo;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(Duration::from_millis(5), Duration::from_millis(20), 2.0)
    }

    fn rate_limited() -> SendGridError {
        SendGridError::from_response(429, r#"{"detail":"too many requests"}"#, None)
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = RetryPolicy::new(Duration::from_millis(100), Duration::from_millis(500), 2.0);
        assert_eq!(policy.calculate_backoff(1), Duration::from_millis(100));
        assert_eq!(policy.calculate_backoff(2), Duration::from_millis(200));
        assert_eq!(policy.calculate_backoff(3), Duration::from_millis(400));
        assert_eq!(policy.calculate_backoff(4), Duration::from_millis(500));
        assert_eq!(policy.calculate_backoff(60), Duration::from_millis(500));
    }

    #[test]
    fn test_delay_prefers_reset_time() {
        let policy = RetryPolicy::new(Duration::from_millis(10), Duration::from_secs(2), 2.0);
        let info = RateLimitInfo {
            limit: 10,
            remaining: 0,
            reset_at: Utc::now() + chrono::Duration::seconds(60),
        };
        let error = rate_limited().with_rate_limit(info);
        assert_eq!(policy.delay_for(1, &error), Duration::from_secs(2));
    }

    #[test]
    fn test_delay_ignores_past_reset_time() {
        let policy = RetryPolicy::new(Duration::from_millis(10), Duration::from_secs(2), 2.0);
        let info = RateLimitInfo {
            limit: 10,
            remaining: 0,
            reset_at: Utc::now() - chrono::Duration::seconds(60),
        };
        let error = rate_limited().with_rate_limit(info);
        assert_eq!(policy.delay_for(1, &error), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_retries_rate_limit_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = fast_policy()
            .execute(Duration::from_secs(5), || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(rate_limited())
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_fast() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: SendGridResult<()> = fast_policy()
            .execute(Duration::from_secs(5), || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(SendGridError::from_response(500, "boom", None))
            })
            .await;

        assert_eq!(result.unwrap_err().status_code(), Some(500));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deadline_wraps_last_error() {
        let result: SendGridResult<()> = fast_policy()
            .execute(Duration::from_millis(60), || async { Err(rate_limited()) })
            .await;

        let err = result.unwrap_err();
        assert_eq!(*err.kind(), SendGridErrorKind::DeadlineExceeded);
        assert_eq!(err.status_code(), Some(429));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_retries_when_backoff_exceeds_timeout() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(Duration::from_secs(1), Duration::from_secs(30), 2.0);
        let started = Instant::now();
        let result = policy
            .execute(Duration::from_millis(800), || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(rate_limited())
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() < Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_deadline_reported_only_after_it_passes() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(Duration::from_secs(1), Duration::from_secs(30), 2.0);
        let started = Instant::now();
        let result: SendGridResult<()> = policy
            .execute(Duration::from_millis(100), || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(rate_limited())
            })
            .await;

        assert_eq!(*result.unwrap_err().kind(), SendGridErrorKind::DeadlineExceeded);
        assert!(started.elapsed() >= Duration::from_millis(100));
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_deadline_cancels_slow_attempt() {
        let result: SendGridResult<()> = fast_policy()
            .execute(Duration::from_millis(20), || async {
                sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert_eq!(*result.unwrap_err().kind(), SendGridErrorKind::DeadlineExceeded);
    }

    #[tokio::test]
    async fn test_disabled_policy_does_not_retry() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::from_config(&RetryConfig {
            enabled: false,
            ..Default::default()
        });
        let result: SendGridResult<()> = policy
            .execute(Duration::from_secs(5), || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(rate_limited())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
