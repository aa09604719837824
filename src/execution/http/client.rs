//! HTTP client builder utilities
//!
//! One place that turns an [`HttpConfig`] into a `reqwest::Client`, used by
//! the Kaizen client and every provider wrapper.

use crate::error::KaizenError;
use crate::types::HttpConfig;

/// Build an HTTP client from HttpConfig
///
/// # Example
/// ```rust
/// use kaizen_client::types::HttpConfig;
/// use kaizen_client::execution::http::build_http_client_from_config;
///
/// let config = HttpConfig::default();
/// let client = build_http_client_from_config(&config)?;
/// # Ok::<(), kaizen_client::KaizenError>(())
/// ```
pub fn build_http_client_from_config(config: &HttpConfig) -> Result<reqwest::Client, KaizenError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| KaizenError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    // Per-request headers are built by the callers; only static extras go here.
    if !config.headers.is_empty() {
        let headers = super::HttpHeaderBuilder::new()
            .with_custom_headers(&config.headers)?
            .build();
        builder = builder.default_headers(headers);
    }

    builder
        .build()
        .map_err(|e| KaizenError::HttpError(format!("Failed to create HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_http_client_default() {
        let config = HttpConfig::default();
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_with_timeout_and_headers() {
        let config = HttpConfig::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .header("X-Custom-Header", "custom-value")
            .build();
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_invalid_header() {
        let config = HttpConfig::builder().header("bad header", "v").build();
        let result = build_http_client_from_config(&config);
        assert!(matches!(result, Err(KaizenError::ConfigurationError(_))));
    }

    #[test]
    fn test_build_http_client_invalid_proxy() {
        let config = HttpConfig::builder().proxy("::not a url::").build();
        let result = build_http_client_from_config(&config);
        assert!(matches!(result, Err(KaizenError::ConfigurationError(_))));
    }
}
