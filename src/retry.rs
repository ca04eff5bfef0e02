use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{
    classify::{decode_body, status_error},
    OllamaError, RequestOutcome, Result, TransportFailure,
};

/// How the delay grows between attempts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Backoff {
    /// `base_delay * (attempt + 1)`.
    #[default]
    Linear,
    /// `base_delay * 2^attempt`, with the exponent capped at 16.
    Exponential,
}

/// Bounded retry configuration for transient failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Delay unit the backoff strategy scales.
    pub base_delay: Duration,
    pub backoff: Backoff,
    /// Treat a per-request timeout as transient instead of terminal.
    pub retry_on_timeout: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            backoff: Backoff::Linear,
            retry_on_timeout: false,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_retry_on_timeout(mut self, retry_on_timeout: bool) -> Self {
        self.retry_on_timeout = retry_on_timeout;
        self
    }

    /// Delay to wait after failed attempt `attempt` (0-indexed).
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let multiplier = match self.backoff {
            Backoff::Linear => u32::try_from(attempt.saturating_add(1)).unwrap_or(u32::MAX),
            Backoff::Exponential => 1u32 << attempt.min(16),
        };
        self.base_delay.saturating_mul(multiplier)
    }
}

/// What the caller should do after an attempt.
#[derive(Debug)]
pub(crate) enum Step<T> {
    /// Sleep for the delay, then issue the request again.
    Retry(Duration),
    Done(Result<T>),
}

/// Attempt bookkeeping for one logical call.
///
/// Both execution models feed every [`RequestOutcome`] through [`RetryState::advance`],
/// so they agree on classification, attempt counts and delays.
#[derive(Debug)]
pub(crate) struct RetryState<'a> {
    policy: &'a RetryPolicy,
    attempt: usize,
}

impl<'a> RetryState<'a> {
    pub(crate) fn new(policy: &'a RetryPolicy) -> Self {
        Self { policy, attempt: 0 }
    }

    /// Number of attempts made so far, counting the one being classified.
    pub(crate) fn attempts(&self) -> usize {
        self.attempt + 1
    }

    pub(crate) fn advance<T: DeserializeOwned>(&mut self, outcome: RequestOutcome) -> Step<T> {
        match outcome {
            Ok(response) if response.is_success() => Step::Done(decode_body(&response.body)),
            Ok(response) if response.is_server_error() => self.transient(status_error(&response)),
            Ok(response) => Step::Done(Err(status_error(&response))),
            Err(TransportFailure::Timeout) if self.policy.retry_on_timeout => {
                self.transient(OllamaError::Timeout)
            }
            Err(failure @ TransportFailure::Connection(_)) => self.transient(failure.into()),
            Err(failure) => Step::Done(Err(failure.into())),
        }
    }

    fn transient<T>(&mut self, cause: OllamaError) -> Step<T> {
        if self.attempt < self.policy.max_retries {
            let delay = self.policy.delay_for(self.attempt);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                attempt = self.attempt + 1,
                delay_ms = delay.as_millis() as u64,
                error = %cause,
                "retrying request"
            );

            self.attempt += 1;
            return Step::Retry(delay);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(attempts = self.attempts(), error = %cause, "retries exhausted");

        Step::Done(Err(OllamaError::MaxRetriesExceeded {
            attempts: self.attempts(),
            last: Box::new(cause),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::Value as JsonValue;

    use super::{Backoff, RetryPolicy, RetryState, Step};
    use crate::{OllamaError, RawResponse, TransportFailure};

    fn policy(max_retries: usize) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(max_retries)
            .with_base_delay(Duration::from_millis(100))
    }

    #[test]
    fn linear_delays_grow_by_base() {
        let policy = policy(3);
        let delays: Vec<_> = (0..3).map(|attempt| policy.delay_for(attempt)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(300),
            ]
        );
    }

    #[test]
    fn exponential_delays_double_and_cap() {
        let policy = policy(3).with_backoff(Backoff::Exponential);
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
        assert_eq!(policy.delay_for(40), policy.delay_for(16));
    }

    #[test]
    fn delays_saturate_instead_of_overflowing() {
        let policy = RetryPolicy::default().with_base_delay(Duration::MAX);
        assert_eq!(policy.delay_for(5), Duration::MAX);
    }

    #[test]
    fn server_error_retries_then_exhausts() {
        let policy = policy(1);
        let mut state = RetryState::new(&policy);

        let first: Step<JsonValue> = state.advance(Ok(RawResponse::new(500, &b"boom"[..])));
        assert!(matches!(first, Step::Retry(delay) if delay == Duration::from_millis(100)));

        let second: Step<JsonValue> = state.advance(Ok(RawResponse::new(502, &b"boom"[..])));
        match second {
            Step::Done(Err(OllamaError::MaxRetriesExceeded { attempts, last })) => {
                assert_eq!(attempts, 2);
                assert_eq!(last.status(), Some(502));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn redirect_and_client_statuses_are_terminal() {
        let policy = policy(5);
        for code in [301, 304, 429] {
            let mut state = RetryState::new(&policy);
            let step: Step<JsonValue> = state.advance(Ok(RawResponse::new(code, Vec::new())));
            assert!(matches!(
                step,
                Step::Done(Err(OllamaError::StatusCode { status, .. })) if status == code
            ));
        }
    }

    #[test]
    fn timeout_is_terminal_unless_opted_in() {
        let strict = policy(2);
        let mut state = RetryState::new(&strict);
        let step: Step<JsonValue> = state.advance(Err(TransportFailure::Timeout));
        assert!(matches!(step, Step::Done(Err(OllamaError::Timeout))));

        let lenient = policy(2).with_retry_on_timeout(true);
        let mut state = RetryState::new(&lenient);
        let step: Step<JsonValue> = state.advance(Err(TransportFailure::Timeout));
        assert!(matches!(step, Step::Retry(_)));
    }

    #[test]
    fn unissuable_request_is_terminal_transport_error() {
        let policy = policy(3);
        let mut state = RetryState::new(&policy);
        let step: Step<JsonValue> =
            state.advance(Err(TransportFailure::Request("builder error".to_owned())));
        assert!(matches!(step, Step::Done(Err(OllamaError::Transport(_)))));
    }
}
