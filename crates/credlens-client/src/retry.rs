//! Backoff for credential search requests.
//!
//! A search is retried only when the identity service could not be reached
//! or did not answer in time. Anything else (a built-but-invalid request, a
//! non-2xx status, an undecodable body) goes straight back to the browser,
//! which shows it in the error banner.
//!
//! All attempts and the sleeps between them share one budget, the
//! configured request timeout. A backoff sleep that would end past the
//! budget is not taken, so a reset surfaces its failure after roughly one
//! timeout instead of one timeout per attempt.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Backoff schedule for search requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Retries after the first attempt.
    pub(crate) max_retries: u32,
    /// First backoff; doubled for each later retry.
    pub(crate) base_delay: Duration,
    /// Wall time allowed for every attempt and sleep together.
    pub(crate) budget: Duration,
}

impl RetryPolicy {
    /// Three retries at 200 ms, 400 ms and 800 ms within `budget`.
    pub(crate) fn within(budget: Duration) -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
            budget,
        }
    }

    /// Sleep before retry number `retry` (0-based), or `None` when the
    /// schedule is exhausted or the sleep would overrun the budget.
    pub(crate) fn backoff(&self, retry: u32, elapsed: Duration) -> Option<Duration> {
        if retry >= self.max_retries {
            return None;
        }
        let delay = self.base_delay.checked_mul(1 << retry)?;
        (elapsed + delay < self.budget).then_some(delay)
    }

    /// Send a search request, retrying unreachable or timed-out attempts.
    ///
    /// The caller inspects the status of whatever response comes back.
    pub(crate) async fn send<F, Fut>(&self, attempt: F) -> Result<reqwest::Response, reqwest::Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let started = Instant::now();
        let mut retry = 0;
        loop {
            let err = match attempt().await {
                Ok(resp) => return Ok(resp),
                Err(e) if is_transient(&e) => e,
                Err(e) => return Err(e),
            };
            let Some(delay) = self.backoff(retry, started.elapsed()) else {
                return Err(err);
            };
            retry += 1;
            tracing::warn!(
                retry,
                max_retries = self.max_retries,
                "identity service unreachable, retrying search in {delay:?}: {err}"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}
