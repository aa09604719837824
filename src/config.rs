//! Client configuration.
//!
//! ```rust
//! use kaizen_client::KaizenClientConfig;
//!
//! let config = KaizenClientConfig::builder()
//!     .base_url("http://127.0.0.1:8000/v1")
//!     .api_key("kz-local")
//!     .build()?;
//! assert_eq!(config.api_root(), "http://127.0.0.1:8000/v1/");
//! # Ok::<(), kaizen_client::KaizenError>(())
//! ```

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::defaults;
use crate::env;
use crate::error::{KaizenError, Result};
use crate::retry_api::RetryOptions;
use crate::types::HttpConfig;

/// Configuration for [`crate::KaizenClient`].
#[derive(Clone)]
pub struct KaizenClientConfig {
    /// Sent as `Authorization: Bearer <key>` when present
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub http: HttpConfig,
    /// Retry options for service calls; `None` disables retries
    pub retry: Option<RetryOptions>,
}

impl std::fmt::Debug for KaizenClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KaizenClientConfig")
            .field("has_api_key", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Default for KaizenClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: defaults::kaizen::BASE_URL.to_string(),
            http: HttpConfig::default(),
            retry: None,
        }
    }
}

impl KaizenClientConfig {
    pub fn builder() -> KaizenClientConfigBuilder {
        KaizenClientConfigBuilder::default()
    }

    /// Load from `KAIZEN_API_KEY`, `KAIZEN_BASE_URL` and `KAIZEN_TIMEOUT_SECS`.
    ///
    /// The API key is optional here; a local service may not require one.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder().base_url(env::env_or(
            env::KAIZEN_BASE_URL,
            defaults::kaizen::BASE_URL,
        ));
        if let Some(key) = env::optional_env(env::KAIZEN_API_KEY) {
            builder = builder.api_key(key);
        }
        if let Some(raw) = env::optional_env(env::KAIZEN_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|_| {
                KaizenError::ConfigurationError(format!(
                    "{} must be a whole number of seconds, got '{raw}'",
                    env::KAIZEN_TIMEOUT_SECS
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    pub(crate) fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret())
    }

    /// Base URL with the API version segment, always ending in `/`.
    ///
    /// `https://api.getkaizen.io/` becomes `https://api.getkaizen.io/v1/`;
    /// a base already ending in `/v1` is kept as-is.
    pub fn api_root(&self) -> String {
        let trimmed = self.base_url.trim_end_matches('/');
        let version = defaults::kaizen::API_VERSION;
        if trimmed.ends_with(&format!("/{version}")) {
            format!("{trimmed}/")
        } else {
            format!("{trimmed}/{version}/")
        }
    }

    /// Absolute URL of an endpoint path such as `prompts/encode`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.api_root(), path.trim_start_matches('/'))
    }

    fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            KaizenError::ConfigurationError(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(KaizenError::ConfigurationError(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }
}

/// Builder for [`KaizenClientConfig`]
#[derive(Debug, Default)]
pub struct KaizenClientConfigBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    http: Option<HttpConfig>,
    timeout: Option<Duration>,
    retry: Option<RetryOptions>,
}

impl KaizenClientConfigBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Request timeout; overrides the one in `http_config`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retry(mut self, options: RetryOptions) -> Self {
        self.retry = Some(options);
        self
    }

    pub fn build(self) -> Result<KaizenClientConfig> {
        let mut http = self.http.unwrap_or_default();
        if let Some(timeout) = self.timeout {
            http.timeout = Some(timeout);
        }
        let config = KaizenClientConfig {
            api_key: self.api_key,
            base_url: self
                .base_url
                .unwrap_or_else(|| defaults::kaizen::BASE_URL.to_string()),
            http,
            retry: self.retry,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = KaizenClientConfig::default();
        assert_eq!(config.base_url, "https://api.getkaizen.io/");
        assert_eq!(config.api_root(), "https://api.getkaizen.io/v1/");
    }

    #[test]
    fn test_api_root_keeps_existing_version() {
        let config = KaizenClientConfig::builder()
            .base_url("http://127.0.0.1:8000/v1")
            .build()
            .unwrap();
        assert_eq!(config.api_root(), "http://127.0.0.1:8000/v1/");
        assert_eq!(
            config.endpoint_url("/prompts/encode"),
            "http://127.0.0.1:8000/v1/prompts/encode"
        );
    }

    #[test]
    fn test_api_root_with_path_prefix() {
        let config = KaizenClientConfig::builder()
            .base_url("https://gateway.example.com/kaizen")
            .build()
            .unwrap();
        assert_eq!(config.endpoint_url("health"), "https://gateway.example.com/kaizen/v1/health");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = KaizenClientConfig::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, KaizenError::ConfigurationError(_)));

        let err = KaizenClientConfig::builder()
            .base_url("ftp://api.getkaizen.io")
            .build()
            .unwrap_err();
        assert!(matches!(err, KaizenError::ConfigurationError(_)));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = KaizenClientConfig::builder().api_key("kz-secret").build().unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("kz-secret"));
        assert!(rendered.contains("has_api_key: true"));
        assert_eq!(config.api_key_str(), Some("kz-secret"));
    }

    #[test]
    fn test_timeout_overrides_http_config() {
        let config = KaizenClientConfig::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(config.http.timeout, Some(Duration::from_secs(3)));
    }
}
