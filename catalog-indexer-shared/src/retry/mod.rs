//! Exponential backoff retry policy with jitter.
//!
//! The policy is a plain strategy value applied by explicit composition at
//! each fallible call site (database connect, bulk load, sync cycle). Which
//! failures are worth retrying is decided by the error type itself through
//! [`RetryClass`]: transient connectivity errors are retried without an
//! attempt cap (a transient outage stalls the current cycle instead of
//! abandoning it), everything else propagates immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

/// Classification of an error as transient (retryable) or fatal.
///
/// Implemented by each error enum that crosses a retry boundary, so the same
/// [`Backoff`] value can wrap heterogeneous call sites with different
/// classification sets.
pub trait RetryClass {
    /// Whether the error is transient connectivity trouble worth retrying.
    fn is_transient(&self) -> bool;
}

/// Exponential backoff parameters.
///
/// On each transient failure the delay becomes
/// `min(delay * factor * (1 + uniform(-jitter, jitter)), max_delay)`.
#[derive(Debug, Clone)]
pub struct Backoff {
    /// Delay seed before the first multiplication.
    pub initial_delay: Duration,
    /// Multiplicative growth factor per attempt.
    pub factor: f64,
    /// Ceiling the delay never exceeds.
    pub max_delay: Duration,
    /// Jitter fraction, e.g. 0.5 for ±50%.
    pub jitter: f64,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(100),
            factor: 2.0,
            max_delay: Duration::from_secs(10),
            jitter: 0.5,
        }
    }
}

impl Backoff {
    pub fn new(initial_delay: Duration, factor: f64, max_delay: Duration, jitter: f64) -> Self {
        Self {
            initial_delay,
            factor,
            max_delay,
            jitter,
        }
    }

    /// Compute the delay following `current` with an explicit jitter factor
    /// in `[-jitter, jitter]`.
    fn scaled(&self, current: Duration, jitter_factor: f64) -> Duration {
        let next = current.as_secs_f64() * self.factor * (1.0 + jitter_factor);
        Duration::from_secs_f64(next.min(self.max_delay.as_secs_f64()))
    }

    /// Compute the randomized delay following `current`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let jitter_factor = if self.jitter > 0.0 {
            rand::thread_rng().gen_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        self.scaled(current, jitter_factor)
    }

    /// Run `call` until it succeeds or fails fatally.
    ///
    /// Transient errors (per [`RetryClass`]) are logged as warnings and
    /// retried after a backoff sleep, without an attempt cap. The first
    /// non-transient error is returned to the caller unchanged.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, E>
    where
        E: RetryClass + std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut delay = self.initial_delay;
        let mut attempt: u64 = 0;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() => {
                    attempt += 1;
                    delay = self.next_delay(delay);
                    warn!(
                        operation,
                        attempt,
                        delay_secs = delay.as_secs_f64(),
                        error = %error,
                        "Transient failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    enum TestError {
        #[error("connection refused")]
        Transient,
        #[error("malformed query")]
        Fatal,
    }

    impl RetryClass for TestError {
        fn is_transient(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn test_scaled_applies_factor_and_jitter() {
        let backoff = Backoff::default();
        assert_eq!(
            backoff.scaled(Duration::from_millis(100), 0.0),
            Duration::from_millis(200)
        );
        assert_eq!(
            backoff.scaled(Duration::from_millis(100), -0.5),
            Duration::from_millis(100)
        );
        assert_eq!(
            backoff.scaled(Duration::from_millis(100), 0.5),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_delay_never_exceeds_ceiling() {
        let backoff = Backoff::default();
        for _ in 0..100 {
            assert_eq!(
                backoff.next_delay(Duration::from_secs(10)),
                Duration::from_secs(10)
            );
        }
    }

    #[test]
    fn test_next_delay_stays_within_jitter_bounds() {
        let backoff = Backoff::default();
        for _ in 0..100 {
            let next = backoff.next_delay(Duration::from_millis(100));
            assert!(next >= Duration::from_millis(100), "got {:?}", next);
            assert!(next <= Duration::from_millis(300), "got {:?}", next);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_retries_transient_until_success() {
        let backoff = Backoff::default();
        let attempts = AtomicUsize::new(0);

        let result: Result<u32, TestError> = backoff
            .run("test", || async {
                if attempts.fetch_add(1, Ordering::SeqCst) < 3 {
                    Err(TestError::Transient)
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_propagates_fatal_immediately() {
        let backoff = Backoff::default();
        let attempts = AtomicUsize::new(0);

        let result: Result<u32, TestError> = backoff
            .run("test", || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Fatal)
            })
            .await;

        assert!(matches!(result, Err(TestError::Fatal)));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
