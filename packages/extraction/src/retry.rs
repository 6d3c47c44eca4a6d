//! Bounded retry with exponential backoff.
//!
//! Wraps an async operation and retries it on transient failures
//! (timeout, rate limit, 5xx, bare network errors; see
//! [`ExtractionError::is_retryable`]). The delay between attempts is
//! a cooperative `tokio::time::sleep`, so waiting on one request
//! never stalls unrelated work.

use std::future::Future;
use std::time::Duration;

use crate::error::{ExtractionError, Result};

/// Retry policy parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    /// Cap applied after the multiplier.
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

/// 3 attempts: 500ms, 1s (capped at 5s).
pub const FAST: RetryPolicy = RetryPolicy {
    max_attempts: 3,
    initial_delay: Duration::from_millis(500),
    max_delay: Duration::from_secs(5),
    backoff_multiplier: 2.0,
};

/// 3 attempts: 1s, 2s (capped at 10s).
pub const STANDARD: RetryPolicy = RetryPolicy {
    max_attempts: 3,
    initial_delay: Duration::from_secs(1),
    max_delay: Duration::from_secs(10),
    backoff_multiplier: 2.0,
};

/// 5 attempts: 1s, 2s, 4s, 8s (capped at 16s).
pub const AGGRESSIVE: RetryPolicy = RetryPolicy {
    max_attempts: 5,
    initial_delay: Duration::from_secs(1),
    max_delay: Duration::from_secs(16),
    backoff_multiplier: 2.0,
};

impl Default for RetryPolicy {
    fn default() -> Self {
        STANDARD
    }
}

impl RetryPolicy {
    /// Backoff delay after the given 1-based failed attempt.
    ///
    /// `initial * multiplier^(attempt - 1)`, capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        let delay = self.initial_delay.mul_f64(factor);
        delay.min(self.max_delay)
    }
}

/// One scheduled retry; lives only for the duration of the policy
/// invocation and is surfaced through the structured log.
#[derive(Debug)]
struct RetryAttempt<'a> {
    attempt: u32,
    delay: Duration,
    error: &'a ExtractionError,
}

/// Run `operation` under `policy`.
///
/// Attempt 1 runs immediately. Non-retryable errors are re-thrown at
/// once; retryable ones are re-thrown after `max_attempts` failures.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    // A zero-attempt policy still runs the operation once.
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if !error.is_retryable() || attempt == max_attempts {
                    return Err(error);
                }

                let scheduled = RetryAttempt {
                    attempt,
                    delay: policy.delay_for(attempt),
                    error: &error,
                };
                tracing::debug!(
                    attempt = scheduled.attempt,
                    max_attempts,
                    delay_ms = scheduled.delay.as_millis() as u64,
                    error = %scheduled.error,
                    "retrying after transient error"
                );
                tokio::time::sleep(scheduled.delay).await;
            }
        }
    }

    unreachable!("retry loop returns on the final attempt")
}
