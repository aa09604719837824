//! Type Conversions for KaizenError
//!
//! From implementations for the error types the client bubbles up.

use super::types::KaizenError;

impl From<reqwest::Error> for KaizenError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::JsonError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for KaizenError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for KaizenError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::ConfigurationError(format!("Invalid header value: {err}"))
    }
}
