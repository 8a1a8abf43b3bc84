//! Retry policy implementation.

use rand::Rng;
use std::time::Duration;

use crate::errors::{DeepLError, DeepLResult};
use crate::transport::{HttpResponse, TransportError};

/// Default maximum number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default upper bound on a single backoff delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

/// Default delay before the first retry.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(500);

/// What to do after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// The outcome is final.
    Stop,
    /// The outcome is transient; wait this long before the next attempt.
    Retry(Duration),
}

/// Retry policy with capped exponential backoff and full jitter.
///
/// Transport failures, HTTP 429 and any 5xx are retried; everything else is
/// terminal. `max_retries` counts attempts after the first, so a policy with
/// `max_retries = 0` sends exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    max_delay: Duration,
    backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            max_delay: DEFAULT_MAX_DELAY,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl RetryPolicy {
    /// Creates a retry policy.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `max_delay < backoff_base`.
    pub fn new(max_retries: u32, max_delay: Duration, backoff_base: Duration) -> DeepLResult<Self> {
        if max_delay < backoff_base {
            return Err(DeepLError::Configuration {
                message: format!(
                    "retry max_delay ({:?}) must not be smaller than backoff_base ({:?})",
                    max_delay, backoff_base
                ),
            });
        }

        Ok(Self {
            max_retries,
            max_delay,
            backoff_base,
        })
    }

    /// Creates a policy that never retries.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Maximum number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Upper bound on a single delay.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Delay before the first retry, before jitter.
    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    /// Returns true if the outcome of an attempt is transient.
    pub fn should_retry(outcome: &Result<HttpResponse, TransportError>) -> bool {
        match outcome {
            Err(_) => true,
            Ok(response) => response.status == 429 || response.status >= 500,
        }
    }

    /// Pre-jitter delay for `attempt`: `min(backoff_base * 2^attempt, max_delay)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.backoff_base.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Jittered delay for `attempt`, drawn uniformly from `[0, backoff(attempt)]`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let ceiling = u64::try_from(self.backoff(attempt).as_nanos()).unwrap_or(u64::MAX);
        Duration::from_nanos(rand::thread_rng().gen_range(0..=ceiling))
    }

    /// Decides whether to retry after `attempt` (zero-based).
    ///
    /// The decision ignores how many retries remain; the executor bounds the
    /// loop with [`RetryPolicy::max_retries`].
    pub fn decide(
        &self,
        outcome: &Result<HttpResponse, TransportError>,
        attempt: u32,
    ) -> RetryDecision {
        if Self::should_retry(outcome) {
            RetryDecision::Retry(self.delay(attempt))
        } else {
            RetryDecision::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::header::HeaderMap;
    use test_case::test_case;

    fn response(status: u16) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        })
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 5);
        assert_eq!(policy.max_delay(), Duration::from_secs(10));
        assert_eq!(policy.backoff_base(), Duration::from_millis(500));
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let result = RetryPolicy::new(3, Duration::from_millis(100), Duration::from_secs(1));
        assert!(matches!(result, Err(DeepLError::Configuration { .. })));
    }

    #[test]
    fn test_new_accepts_zero_durations() {
        let policy = RetryPolicy::new(0, Duration::ZERO, Duration::ZERO).unwrap();
        assert_eq!(policy.backoff(0), Duration::ZERO);
        assert_eq!(policy.delay(3), Duration::ZERO);
    }

    #[test_case(429, true ; "rate limited")]
    #[test_case(500, true ; "internal error")]
    #[test_case(503, true ; "unavailable")]
    #[test_case(529, true ; "overloaded")]
    #[test_case(200, false ; "ok")]
    #[test_case(400, false ; "bad request")]
    #[test_case(403, false ; "forbidden")]
    #[test_case(456, false ; "quota exceeded")]
    fn test_should_retry_status(status: u16, expected: bool) {
        assert_eq!(RetryPolicy::should_retry(&response(status)), expected);
    }

    #[test]
    fn test_should_retry_transport_error() {
        let outcome = Err(TransportError::Timeout {
            message: "timed out".to_string(),
        });
        assert!(RetryPolicy::should_retry(&outcome));
    }

    #[test]
    fn test_backoff_doubles_until_capped() {
        let policy =
            RetryPolicy::new(10, Duration::from_secs(1), Duration::from_millis(100)).unwrap();

        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(400));
        assert_eq!(policy.backoff(3), Duration::from_millis(800));
        assert_eq!(policy.backoff(4), Duration::from_secs(1));
    }

    #[test]
    fn test_backoff_saturates_on_large_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(31), policy.max_delay());
        assert_eq!(policy.backoff(64), policy.max_delay());
        assert_eq!(policy.backoff(u32::MAX), policy.max_delay());
    }

    #[test]
    fn test_jittered_delay_within_bound() {
        let policy =
            RetryPolicy::new(5, Duration::from_millis(750), Duration::from_millis(50)).unwrap();

        for attempt in 0..8 {
            let bound = policy.backoff(attempt);
            assert_eq!(
                bound,
                (Duration::from_millis(50) * 2u32.pow(attempt)).min(Duration::from_millis(750))
            );
            for _ in 0..200 {
                assert!(policy.delay(attempt) <= bound);
            }
        }
    }

    #[test]
    fn test_decide() {
        let policy =
            RetryPolicy::new(1, Duration::from_millis(10), Duration::from_millis(10)).unwrap();

        assert_eq!(policy.decide(&response(400), 0), RetryDecision::Stop);
        match policy.decide(&response(503), 0) {
            RetryDecision::Retry(delay) => assert!(delay <= Duration::from_millis(10)),
            RetryDecision::Stop => panic!("503 should be retried"),
        }
    }

    #[test]
    fn test_no_retries() {
        assert_eq!(RetryPolicy::no_retries().max_retries(), 0);
    }
}
