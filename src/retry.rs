//! Bounded retry with exponential backoff for GitHub calls.
//!
//! Every failure is treated as retryable: there is no jitter and no
//! distinction between transient and permanent errors. Callers that want to
//! give up early on some errors use [`retry_if`] with a predicate.
//!
//! Backoff sleeps only suspend the calling task. There is no way to cancel a
//! retry loop once it started other than dropping its future.

use crate::constants;
use crate::logger::Logger;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How many times to try a call and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Always at least 1.
    pub max_attempts: u32,

    /// Delay before the second attempt; doubled for each later one.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// 3 attempts, waiting 500ms then 1s.
    pub const DEFAULT: Self = Self {
        max_attempts: constants::retry::MAX_ATTEMPTS,
        base_delay: constants::retry::BASE_DELAY,
    };

    /// Creates a policy; `max_attempts` of zero is raised to one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// A single attempt, never sleeping.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay after failed attempt `attempt` (1-indexed): `base_delay * 2^(attempt-1)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Every delay the policy can produce, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..self.max_attempts).map(move |attempt| self.delay_for_attempt(attempt))
    }

    /// Worst-case time spent sleeping.
    pub fn total_max_wait(&self) -> Duration {
        self.delays().sum()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Runs `operation` until it succeeds or `policy.max_attempts` is reached.
///
/// The error of the last attempt is returned unchanged.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, operation: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_if(policy, |_| true, operation).await
}

/// Like [`retry`], but errors for which `should_retry` is false are returned
/// immediately.
pub async fn retry_if<T, E, F, Fut, P>(
    policy: RetryPolicy,
    should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let logger = Logger;
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= max_attempts || !should_retry(&e) {
                    return Err(e);
                }

                let delay = policy.delay_for_attempt(attempt);
                logger.warn(
                    "retry",
                    &format!(
                        "Attempt {}/{} failed: {}; retrying in {:?}",
                        attempt, max_attempts, e, delay
                    ),
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
