//! Retries driven by the `backoff` crate.

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use std::time::Duration;

use crate::error::KaizenError;

/// Default exponential backoff used for Kaizen calls.
pub fn default_backoff() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(500))
        .with_max_interval(Duration::from_secs(30))
        .with_multiplier(2.0)
        .with_max_elapsed_time(Some(Duration::from_secs(120)))
        .build()
}

/// Retry executor wrapping an [`ExponentialBackoff`].
#[derive(Debug, Clone)]
pub struct BackoffRetryExecutor {
    backoff: ExponentialBackoff,
}

impl Default for BackoffRetryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl BackoffRetryExecutor {
    pub fn new() -> Self {
        Self {
            backoff: default_backoff(),
        }
    }

    pub fn with_backoff(backoff: ExponentialBackoff) -> Self {
        Self { backoff }
    }

    /// Run `operation` until it succeeds, fails permanently, or the backoff
    /// gives up. Non-retryable errors are returned immediately.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, KaizenError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, KaizenError>>,
    {
        let operation = &operation;
        backoff::future::retry(self.backoff.clone(), || async move {
            operation().await.map_err(|error| {
                if !error.is_retryable() {
                    return backoff::Error::permanent(error);
                }
                tracing::debug!(target: "kaizen_client::retry", error = %error, "transient error, backing off");
                match error.retry_after() {
                    Some(hint) => backoff::Error::retry_after(error, hint),
                    None => backoff::Error::transient(error),
                }
            })
        })
        .await
    }
}
