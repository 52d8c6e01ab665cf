//! Bounded retry with backoff.
//!
//! One combinator, parameterized by a [`RetryPolicy`] and a per-error
//! retryability predicate. The office-to-PDF bridge is the main consumer;
//! the policy shape is general enough for any flaky external call.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Attempt budget and backoff curve for a retried operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Must be at least 1.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt, in milliseconds.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Multiplier applied to the delay after each failed attempt.
    /// 1.0 gives a fixed backoff.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Upper bound on any single delay, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    10
}

fn default_initial_delay_ms() -> u64 {
    5_000
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_max_delay_ms() -> u64 {
    60_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            multiplier: default_multiplier(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Fixed backoff: the same delay between every attempt.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay_ms: delay.as_millis() as u64,
            multiplier: 1.0,
            max_delay_ms: delay.as_millis() as u64,
        }
    }

    /// Delay to sleep after the given zero-based failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let raw = self.initial_delay_ms as f64 * self.multiplier.powi(attempt as i32);
        Duration::from_millis((raw as u64).min(self.max_delay_ms))
    }
}

/// Runs `operation` until it succeeds, the error is not retryable, or the
/// attempt budget is exhausted. The last error is returned on exhaustion.
///
/// `is_retryable` decides per error whether another attempt makes sense;
/// non-retryable errors propagate immediately.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    is_retryable: R,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) => {
                attempt += 1;
                if attempt >= max_attempts || !is_retryable(&error) {
                    return Err(error);
                }
                let delay = policy.delay_after(attempt - 1);
                warn!(attempt, max_attempts, %error, "attempt failed, backing off");
                tokio::time::sleep(delay).await;
            }
        }
    }
}
