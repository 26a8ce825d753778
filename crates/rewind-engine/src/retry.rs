//! Generic bounded retry for transient replay conditions.
//!
//! A target page may still be loading, animating, or re-rendering when a step
//! executes. Element actions are therefore wrapped in a retry executor
//! parameterized by attempt ceiling, backoff schedule, and a retryable-error
//! predicate; everything non-retryable surfaces immediately.

use futures::future::BoxFuture;
use std::fmt::Display;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
            backoff_multiplier: 2.0,
        }
    }
}

/// Run `operation` against `state` until it succeeds, fails with a
/// non-retryable error, or exhausts the policy's attempt ceiling.
///
/// The operation reborrows `state` on every attempt, so it can hold exclusive
/// access to a driver session across retries.
pub async fn retry<S, T, E, F, P>(
    policy: &RetryPolicy,
    operation_name: &str,
    state: &mut S,
    mut operation: F,
    retryable: P,
) -> Result<T, E>
where
    S: ?Sized,
    E: Display,
    F: for<'a> FnMut(&'a mut S) -> BoxFuture<'a, Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.delay;
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation(&mut *state).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && retryable(&e) => {
                tracing::debug!(
                    "{} failed (attempt {}/{}): {}, retrying in {:?}",
                    operation_name,
                    attempt,
                    max_attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = delay.mul_f64(policy.backoff_multiplier);
            }
            Err(e) => return Err(e),
        }
    }
}
