//! Retry-wrapped execution of a single logical request.

use serde::de::DeserializeOwned;

use crate::{
    retry::{RetryState, Step},
    HttpRequest, Result, RetryPolicy, Sleep, Transport,
};

#[cfg(feature = "blocking")]
use crate::{BlockingSleep, BlockingTransport};

/// Sends `request` until it succeeds, fails terminally, or the policy runs out,
/// suspending the task between attempts.
///
/// Makes between 1 and `policy.max_retries + 1` round trips.
pub async fn execute<T: DeserializeOwned>(
    transport: &dyn Transport,
    sleeper: &dyn Sleep,
    request: &HttpRequest,
    policy: &RetryPolicy,
) -> Result<T> {
    let mut state = RetryState::new(policy);
    loop {
        let outcome = transport.send(request).await;
        match state.advance(outcome) {
            Step::Retry(delay) => sleeper.sleep(delay).await,
            Step::Done(result) => return result,
        }
    }
}

/// Blocking counterpart of [`execute`], with identical attempt and backoff behavior.
#[cfg(feature = "blocking")]
pub fn execute_blocking<T: DeserializeOwned>(
    transport: &dyn BlockingTransport,
    sleeper: &dyn BlockingSleep,
    request: &HttpRequest,
    policy: &RetryPolicy,
) -> Result<T> {
    let mut state = RetryState::new(policy);
    loop {
        let outcome = transport.send(request);
        match state.advance(outcome) {
            Step::Retry(delay) => sleeper.sleep(delay),
            Step::Done(result) => return result,
        }
    }
}
