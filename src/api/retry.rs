//! Retry classification and fixed-schedule backoff for page fetches.
//!
//! Failed requests are classified into a [`FailureType`] which drives the
//! retry loop in the page client:
//! - [`FailureType::Transient`] - 5xx, timeouts, network errors; retried
//! - [`FailureType::RateLimited`] - HTTP 429; retried on the same schedule
//!   but logged distinctly and flagged on exhaustion
//! - [`FailureType::Fatal`] - any other non-2xx status or a malformed body;
//!   never retried
//!
//! The backoff schedule is fixed (1s, 2s, 4s by default) rather than
//! exponential-with-jitter: deterministic wait timing is part of the
//! client's contract and is asserted by tests.

use std::time::Duration;

use tracing::debug;

use super::FetchError;

/// Default maximum retry attempts after the initial request.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default waits between attempts. The schedule is not jittered; the Nth
/// failure waits `schedule[N-1]`, clamped to the last entry.
pub const DEFAULT_BACKOFF_SCHEDULE: [Duration; 3] = [
    Duration::from_secs(1),
    Duration::from_secs(2),
    Duration::from_secs(4),
];

/// Classification of a failed page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Temporary failure that may succeed on retry (5xx, timeout, network).
    Transient,

    /// Upstream rate limiting (HTTP 429). Retried, but reported distinctly.
    RateLimited,

    /// Failure that retrying cannot fix (other non-2xx, malformed body).
    Fatal,
}

/// Decision on whether to retry a failed page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay.
    Retry {
        /// How long to wait before retrying.
        delay: Duration,
        /// The attempt number the retry will be (1-indexed).
        attempt: u32,
    },

    /// Do not retry.
    DoNotRetry {
        /// Human-readable reason why retry is not attempted.
        reason: String,
    },
}

/// Retry configuration: attempt budget plus a fixed backoff schedule.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt.
    max_retries: u32,

    /// Wait before each retry; index N-1 is used after the Nth failure,
    /// clamped to the last entry when the schedule is shorter than the
    /// retry budget.
    schedule: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            schedule: DEFAULT_BACKOFF_SCHEDULE.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// Creates a retry policy with a custom budget and backoff schedule.
    ///
    /// An empty schedule is replaced with the default one.
    #[must_use]
    pub fn new(max_retries: u32, schedule: Vec<Duration>) -> Self {
        let schedule = if schedule.is_empty() {
            DEFAULT_BACKOFF_SCHEDULE.to_vec()
        } else {
            schedule
        };
        Self {
            max_retries,
            schedule,
        }
    }

    /// Creates a policy with a custom retry budget and the default schedule.
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Retries allowed after the initial attempt.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total attempts a page may consume (initial + retries).
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Decides whether to retry after the given attempt failed.
    ///
    /// `attempt` is the 1-indexed attempt that just failed; `failure_type`
    /// is its classification.
    pub fn should_retry(&self, failure_type: FailureType, attempt: u32) -> RetryDecision {
        if failure_type == FailureType::Fatal {
            return RetryDecision::DoNotRetry {
                reason: "fatal failure - retry would not help".to_string(),
            };
        }

        if attempt > self.max_retries {
            debug!(attempt, max_retries = self.max_retries, "retries exhausted");
            return RetryDecision::DoNotRetry {
                reason: format!("retry budget ({}) exhausted", self.max_retries),
            };
        }

        let delay = self.delay_for(attempt);
        debug!(
            attempt,
            next_attempt = attempt + 1,
            delay_ms = delay.as_millis(),
            rate_limited = failure_type == FailureType::RateLimited,
            "will retry"
        );

        RetryDecision::Retry {
            delay,
            attempt: attempt + 1,
        }
    }

    /// Wait applied after the Nth failed attempt (1-indexed), clamped to the
    /// last schedule entry.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let index = (attempt.max(1) as usize - 1).min(self.schedule.len() - 1);
        self.schedule[index]
    }
}

/// Classifies a fetch error for retry decisions.
///
/// | Error | Type |
/// |-------|------|
/// | HTTP 429 | RateLimited |
/// | HTTP 5xx | Transient |
/// | Other non-2xx | Fatal |
/// | Timeout | Transient |
/// | Network | Transient |
/// | Malformed body | Fatal |
#[must_use]
pub fn classify_error(error: &FetchError) -> FailureType {
    match error {
        FetchError::HttpStatus { status, .. } => classify_http_status(*status),
        FetchError::Timeout { .. } | FetchError::Network { .. } => FailureType::Transient,
        FetchError::MalformedResponse { .. }
        | FetchError::PageFetchExhausted { .. }
        | FetchError::Cancelled => FailureType::Fatal,
    }
}

/// Classifies an HTTP status code into a failure type.
#[must_use]
pub fn classify_http_status(status: u16) -> FailureType {
    match status {
        429 => FailureType::RateLimited,
        status if (500..600).contains(&status) => FailureType::Transient,
        _ => FailureType::Fatal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.max_attempts(), 4);
    }

    #[test]
    fn test_default_schedule_waits_sum_to_seven_seconds() {
        let policy = RetryPolicy::default();
        let total: Duration = (1..=3).map(|attempt| policy.delay_for(attempt)).sum();
        assert_eq!(total, Duration::from_secs(7));
    }

    #[test]
    fn test_delay_follows_fixed_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
    }

    #[test]
    fn test_delay_clamps_to_last_schedule_entry() {
        let policy = RetryPolicy::new(5, vec![Duration::from_millis(10)]);
        assert_eq!(policy.delay_for(1), Duration::from_millis(10));
        assert_eq!(policy.delay_for(4), Duration::from_millis(10));
    }

    #[test]
    fn test_empty_schedule_falls_back_to_default() {
        let policy = RetryPolicy::new(3, Vec::new());
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
    }

    #[test]
    fn test_fatal_does_not_retry() {
        let policy = RetryPolicy::default();
        let decision = policy.should_retry(FailureType::Fatal, 1);
        assert!(matches!(decision, RetryDecision::DoNotRetry { .. }));
        if let RetryDecision::DoNotRetry { reason } = decision {
            assert!(reason.contains("fatal"));
        }
    }

    #[test]
    fn test_transient_retries_until_budget_exhausted() {
        let policy = RetryPolicy::default();

        for attempt in 1..=3 {
            let decision = policy.should_retry(FailureType::Transient, attempt);
            assert!(
                matches!(decision, RetryDecision::Retry { .. }),
                "attempt {attempt} should retry"
            );
        }

        let decision = policy.should_retry(FailureType::Transient, 4);
        assert!(matches!(decision, RetryDecision::DoNotRetry { .. }));
        if let RetryDecision::DoNotRetry { reason } = decision {
            assert!(reason.contains("exhausted"));
        }
    }

    #[test]
    fn test_rate_limited_uses_same_schedule() {
        let policy = RetryPolicy::default();
        let decision = policy.should_retry(FailureType::RateLimited, 2);
        match decision {
            RetryDecision::Retry { delay, attempt } => {
                assert_eq!(delay, Duration::from_secs(2));
                assert_eq!(attempt, 3);
            }
            RetryDecision::DoNotRetry { reason } => panic!("expected retry, got: {reason}"),
        }
    }

    #[test]
    fn test_zero_retry_budget_never_retries() {
        let policy = RetryPolicy::with_max_retries(0);
        let decision = policy.should_retry(FailureType::Transient, 1);
        assert!(matches!(decision, RetryDecision::DoNotRetry { .. }));
    }

    #[test]
    fn test_classify_429_rate_limited() {
        assert_eq!(classify_http_status(429), FailureType::RateLimited);
    }

    #[test]
    fn test_classify_5xx_transient() {
        for status in [500, 502, 503, 504, 599] {
            assert_eq!(
                classify_http_status(status),
                FailureType::Transient,
                "status {status}"
            );
        }
    }

    #[test]
    fn test_classify_other_non_2xx_fatal() {
        for status in [400, 401, 403, 404, 410, 451] {
            assert_eq!(
                classify_http_status(status),
                FailureType::Fatal,
                "status {status}"
            );
        }
    }

    #[test]
    fn test_classify_timeout_and_malformed() {
        assert_eq!(
            classify_error(&FetchError::timeout(1)),
            FailureType::Transient
        );
        assert_eq!(
            classify_error(&FetchError::malformed(1, "bad body")),
            FailureType::Fatal
        );
    }
}
