//! Public Retry API Facade
//!
//! Retries are opt-in: attach `RetryOptions` through
//! `KaizenClientConfig::builder().retry(...)`. Only errors for which
//! [`KaizenError::is_retryable`] holds are repeated, and a rate-limit
//! `retry-after` hint replaces the computed delay.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use kaizen_client::retry_api::{BackoffRetryExecutor, RetryOptions};
//! use kaizen_client::KaizenClientConfig;
//!
//! let mut backoff = kaizen_client::retry::default_backoff();
//! backoff.max_elapsed_time = Some(Duration::from_secs(10));
//! let config = KaizenClientConfig::builder()
//!     .retry(RetryOptions::backoff().with_backoff_executor(BackoffRetryExecutor::with_backoff(backoff)))
//!     .build()?;
//! # Ok::<(), kaizen_client::KaizenError>(())
//! ```

use crate::error::KaizenError;
use crate::execution::http::request_ids;
use reqwest::header::HeaderMap;

pub use crate::retry::BackoffRetryExecutor;

/// Retry options for Kaizen calls.
#[derive(Debug, Clone, Default)]
pub struct RetryOptions {
    pub executor: BackoffRetryExecutor,
}

impl RetryOptions {
    /// Default exponential backoff (500ms doubling, 30s cap, 2min budget).
    pub fn backoff() -> Self {
        Self::default()
    }

    /// Replace the executor, e.g. to shorten the backoff.
    pub fn with_backoff_executor(mut self, executor: BackoffRetryExecutor) -> Self {
        self.executor = executor;
        self
    }
}

/// Retry only when options are provided.
pub async fn maybe_retry<F, Fut, T>(
    options: Option<RetryOptions>,
    operation: F,
) -> Result<T, KaizenError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, KaizenError>>,
{
    match options {
        Some(opts) => opts.executor.execute(operation).await,
        None => operation().await,
    }
}

/// Best-effort human message from an error body.
///
/// Looks at `error.message`, `error` (string), `detail` and `message`, in that order.
fn extract_error_message(body_text: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body_text).ok()?;
    let candidates = [
        json.pointer("/error/message"),
        json.get("error").filter(|v| v.is_string()),
        json.get("detail"),
        json.get("message"),
    ];
    candidates.into_iter().flatten().find_map(|v| match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    })
}

/// Classify an HTTP failure into a specific error with retry hints.
pub fn classify_http_error(
    target: &str,
    status: u16,
    body_text: &str,
    headers: &HeaderMap,
) -> KaizenError {
    let ids = request_ids(headers);
    let ids_suffix = if ids.is_empty() {
        String::new()
    } else {
        format!(" ids=[{}]", ids.join(","))
    };
    let message = extract_error_message(body_text).unwrap_or_else(|| {
        let sample: String = body_text.chars().take(200).collect();
        if sample.trim().is_empty() {
            "no response body".to_string()
        } else {
            sample
        }
    });
    let message = format!("{target}: {message}{ids_suffix}");

    match status {
        401 | 403 => KaizenError::AuthenticationError(message),
        429 => KaizenError::RateLimitError {
            message,
            retry_after: headers
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok()),
        },
        500..=599 => KaizenError::ServerError {
            code: status,
            message,
        },
        _ => {
            let details = match serde_json::from_str::<serde_json::Value>(body_text) {
                Ok(json) => serde_json::json!({
                    "status": status,
                    "target": target,
                    "response": json,
                    "request_ids": ids,
                }),
                Err(_) => serde_json::json!({
                    "status": status,
                    "target": target,
                    "raw": body_text,
                    "request_ids": ids,
                }),
            };
            KaizenError::ApiError {
                code: status,
                message,
                details: Some(details),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };
    use std::time::Duration;

    #[tokio::test]
    async fn maybe_retry_with_options_repeats_server_errors() {
        let opts = RetryOptions::backoff().with_backoff_executor(BackoffRetryExecutor::with_backoff(
            backoff::ExponentialBackoffBuilder::new()
                .with_initial_interval(Duration::from_millis(1))
                .with_max_elapsed_time(Some(Duration::from_secs(2)))
                .build(),
        ));
        let attempts = Arc::new(AtomicU32::new(0));
        let res: Result<(), KaizenError> = maybe_retry(Some(opts), || {
            let attempts = attempts.clone();
            async move {
                if attempts.fetch_add(1, Ordering::Relaxed) < 1 {
                    Err(KaizenError::ServerError {
                        code: 500,
                        message: "server".into(),
                    })
                } else {
                    Ok(())
                }
            }
        })
        .await;
        assert!(res.is_ok());
        assert_eq!(attempts.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn maybe_retry_without_options_runs_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let res: Result<(), KaizenError> = maybe_retry(None, || {
            let attempts = attempts.clone();
            async move {
                attempts.fetch_add(1, Ordering::Relaxed);
                Err(KaizenError::HttpError("down".into()))
            }
        })
        .await;
        assert!(res.is_err());
        assert_eq!(attempts.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn classify_maps_statuses() {
        let headers = HeaderMap::new();
        assert!(matches!(
            classify_http_error("kaizen", 401, "", &headers),
            KaizenError::AuthenticationError(_)
        ));
        assert!(matches!(
            classify_http_error("kaizen", 503, "", &headers),
            KaizenError::ServerError { code: 503, .. }
        ));
        assert!(matches!(
            classify_http_error("kaizen", 422, r#"{"detail":"bad prompt"}"#, &headers),
            KaizenError::ApiError { code: 422, .. }
        ));
    }

    #[test]
    fn classify_extracts_message_and_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-7"));
        let err = classify_http_error(
            "openai",
            400,
            r#"{"error":{"message":"Invalid model","type":"invalid_request_error"}}"#,
            &headers,
        );
        match err {
            KaizenError::ApiError { code, message, details } => {
                assert_eq!(code, 400);
                assert_eq!(message, "openai: Invalid model ids=[x-request-id=req-7]");
                assert_eq!(details.unwrap()["response"]["error"]["type"], "invalid_request_error");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn classify_rate_limit_reads_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("7"));
        let err = classify_http_error("kaizen", 429, "", &headers);
        assert!(matches!(
            err,
            KaizenError::RateLimitError {
                retry_after: Some(7),
                ..
            }
        ));
    }
}
