use crate::error::{Error, Result};
use std::fmt::Display;
use std::time::Duration;

/// Fixed-interval retry budget. No backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(Error::InvalidInput(
                "retry budget must allow at least one attempt".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Runs `op` until it succeeds or the policy's attempts are used up.
///
/// `op` receives the 1-based attempt number. The sleep happens only between
/// attempts, never after the last one.
pub fn retry<T, E, F>(policy: &RetryPolicy, op: F) -> Result<T>
where
    E: Display,
    F: FnMut(u32) -> std::result::Result<T, E>,
{
    retry_with_sleep(policy, op, std::thread::sleep)
}

/// [`retry`] with the pause between attempts supplied by the caller.
pub fn retry_with_sleep<T, E, F, S>(policy: &RetryPolicy, mut op: F, mut sleep: S) -> Result<T>
where
    E: Display,
    F: FnMut(u32) -> std::result::Result<T, E>,
    S: FnMut(Duration),
{
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!("Attempt {} failed: {}", attempt, e);

                if attempt >= policy.max_attempts {
                    return Err(Error::RetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }

                tracing::info!("Retrying in {:?}...", policy.delay);
                sleep(policy.delay);
                attempt += 1;
            }
        }
    }
}
