/*!
 * Retry policy for provider calls.
 *
 * Retrying belongs to the orchestration layer: providers perform a single
 * request, the template engine never retries at all, and this policy is
 * applied explicitly around the provider call by the translation service.
 */

use std::future::Future;
use std::time::Duration;
use log::warn;

use crate::errors::ProviderError;

/// Exponential backoff retry policy
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (the first call included)
    pub max_attempts: u32,
    /// Base backoff time in milliseconds, doubled on each retry
    pub base_delay_ms: u64,
    /// Backoff ceiling in milliseconds
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Backoff delay before the given retry (attempt numbering starts at 1)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let doubled = self
            .base_delay_ms
            .saturating_mul(1u64 << (attempt.saturating_sub(1)).min(16));
        Duration::from_millis(doubled.min(self.max_delay_ms))
    }

    /// Run an operation, retrying transient provider failures with
    /// exponential backoff.
    ///
    /// Non-retryable errors (authentication, client errors, unparseable
    /// responses) are returned immediately.
    pub async fn run<T, F, Fut>(&self, operation: F) -> Result<T, ProviderError>
    where
        F: Fn(u32) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !error.is_retryable() || attempt >= self.max_attempts {
                        return Err(error);
                    }

                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        "Provider call failed (attempt {}/{}), retrying in {:?}: {}",
                        attempt, self.max_attempts, delay, error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
