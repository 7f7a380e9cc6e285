//! Retry policy for advisory calls.
//!
//! The policy is an explicit object injected into the gateway, with the
//! wait behind a [`Sleeper`] seam so tests drive retries deterministically
//! instead of sleeping for real. The production sleeper is tokio's timer,
//! which stays cancellable from the caller side.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AdvisoryError;

/// Waits between retry attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by tokio's timer.
#[derive(Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded retry with a fixed delay between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Wait between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `op` up to `max_attempts` times, sleeping `delay` between
    /// failures. Returns the first success or the last error once the
    /// attempts are exhausted. No sleep happens after the final failure.
    pub async fn run<T, F, Fut>(
        &self,
        sleeper: &dyn Sleeper,
        mut op: F,
    ) -> Result<T, AdvisoryError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AdvisoryError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut last_error = AdvisoryError::Network("no attempts made".into());

        for attempt in 1..=max_attempts {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(attempt, max_attempts, error = %e, "advisory attempt failed");
                    last_error = e;
                    if attempt < max_attempts {
                        sleeper.sleep(self.delay).await;
                    }
                }
            }
        }

        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Records requested waits instead of sleeping.
    #[derive(Default)]
    struct RecordingSleeper {
        waits: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.waits.lock().unwrap().push(duration);
        }
    }

    #[tokio::test]
    async fn exhaustion_makes_exactly_max_attempts() {
        let sleeper = RecordingSleeper::default();
        let policy = RetryPolicy::new(3, Duration::from_millis(250));
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = policy
            .run(&sleeper, |_| {
                calls.fetch_add(1, Ordering::Relaxed);
                async { Err(AdvisoryError::Network("unreachable".into())) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 3);
        // No sleep after the final failure.
        assert_eq!(
            *sleeper.waits.lock().unwrap(),
            vec![Duration::from_millis(250); 2]
        );
    }

    #[tokio::test]
    async fn success_on_second_attempt_stops_retrying() {
        let sleeper = RecordingSleeper::default();
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        let calls = AtomicU32::new(0);

        let result = policy
            .run(&sleeper, |attempt| {
                calls.fetch_add(1, Ordering::Relaxed);
                async move {
                    if attempt < 2 {
                        Err(AdvisoryError::Timeout)
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert_eq!(sleeper.waits.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn zero_attempts_is_clamped_to_one() {
        let sleeper = RecordingSleeper::default();
        let policy = RetryPolicy::new(0, Duration::ZERO);
        let result = policy.run(&sleeper, |_| async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }
}
