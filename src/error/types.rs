//! Core error types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KaizenError>;

/// Coarse classification of a [`KaizenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Authentication,
    RateLimit,
    Client,
    Server,
    Parsing,
    Internal,
}

/// Errors returned by the Kaizen client and the provider wrappers.
#[derive(Error, Debug, Clone)]
pub enum KaizenError {
    /// A required environment variable is absent or blank
    #[error("{name} must be set")]
    MissingEnvironment { name: String },

    /// Invalid client or provider configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-success response that fits no narrower variant
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// 401/403 from the service or provider
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 429 from the service or provider
    #[error("Rate limit exceeded: {message}")]
    RateLimitError {
        message: String,
        /// Seconds suggested by a `retry-after` header
        retry_after: Option<u64>,
    },

    /// 5xx from the service or provider
    #[error("Server error {code}: {message}")]
    ServerError { code: u16, message: String },

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Well-formed JSON with an unexpected shape
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The client was closed with [`crate::KaizenClient::close`]
    #[error("Client has been closed")]
    ClientClosed,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl KaizenError {
    /// Shorthand for [`KaizenError::ApiError`] without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Shorthand for [`KaizenError::MissingEnvironment`].
    pub fn missing_env(name: impl Into<String>) -> Self {
        Self::MissingEnvironment { name: name.into() }
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } | Self::ServerError { code, .. } => Some(*code),
            Self::RateLimitError { .. } => Some(429),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingEnvironment { .. } | Self::ConfigurationError(_) => {
                ErrorCategory::Configuration
            }
            Self::HttpError(_) => ErrorCategory::Network,
            Self::AuthenticationError(_) => ErrorCategory::Authentication,
            Self::RateLimitError { .. } => ErrorCategory::RateLimit,
            Self::ServerError { .. } => ErrorCategory::Server,
            Self::ApiError { code, .. } if *code >= 500 => ErrorCategory::Server,
            Self::ApiError { .. } | Self::ClientClosed => ErrorCategory::Client,
            Self::JsonError(_) | Self::ParseError(_) => ErrorCategory::Parsing,
            Self::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::RateLimitError { .. } | Self::ServerError { .. } => true,
            Self::ApiError { code, .. } => matches!(code, 408 | 409) || *code >= 500,
            _ => false,
        }
    }

    /// Server-suggested wait before retrying.
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        match self {
            Self::RateLimitError {
                retry_after: Some(secs),
                ..
            } => Some(std::time::Duration::from_secs(*secs)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            KaizenError::missing_env("KAIZEN_API_KEY").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            KaizenError::HttpError("reset".into()).category(),
            ErrorCategory::Network
        );
        assert_eq!(
            KaizenError::api_error(503, "down").category(),
            ErrorCategory::Server
        );
        assert_eq!(KaizenError::ClientClosed.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_retryable() {
        assert!(KaizenError::HttpError("timeout".into()).is_retryable());
        assert!(
            KaizenError::ServerError {
                code: 502,
                message: "bad gateway".into()
            }
            .is_retryable()
        );
        assert!(KaizenError::api_error(408, "timeout").is_retryable());
        assert!(!KaizenError::api_error(400, "bad").is_retryable());
        assert!(!KaizenError::AuthenticationError("nope".into()).is_retryable());
        assert!(!KaizenError::ClientClosed.is_retryable());
    }

    #[test]
    fn test_missing_env_message() {
        let err = KaizenError::missing_env("OPENAI_API_KEY");
        assert_eq!(err.to_string(), "OPENAI_API_KEY must be set");
    }

    #[test]
    fn test_retry_after() {
        let err = KaizenError::RateLimitError {
            message: "slow down".into(),
            retry_after: Some(3),
        };
        assert_eq!(err.retry_after(), Some(std::time::Duration::from_secs(3)));
        assert_eq!(err.status_code(), Some(429));
    }
}
