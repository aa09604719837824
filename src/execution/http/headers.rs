//! HTTP Headers Utility
//!
//! Header construction shared by the Kaizen client and the provider wrappers.

use crate::error::KaizenError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, KaizenError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            KaizenError::ConfigurationError(format!("Invalid API key format: {e}"))
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Add an API key under a custom header name (e.g. `x-api-key`)
    pub fn with_api_key_header(mut self, header_name: &str, key: &str) -> Result<Self, KaizenError> {
        let name = HeaderName::from_bytes(header_name.as_bytes()).map_err(|e| {
            KaizenError::ConfigurationError(format!("Invalid header name '{header_name}': {e}"))
        })?;
        let mut value = HeaderValue::from_str(key).map_err(|e| {
            KaizenError::ConfigurationError(format!("Invalid API key format: {e}"))
        })?;
        value.set_sensitive(true);
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, KaizenError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            KaizenError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                KaizenError::ConfigurationError(format!("Invalid header value '{value}': {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, KaizenError> {
        for (key, value) in custom_headers {
            self = self.with_header(key, value)?;
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// First value among well-known request/trace id headers, formatted as `name=value`.
pub fn request_ids(headers: &HeaderMap) -> Vec<String> {
    const ID_KEYS: [&str; 6] = [
        "x-request-id",
        "request-id",
        "x-response-id",
        "x-trace-id",
        "x-goog-request-id",
        "traceparent",
    ];
    ID_KEYS
        .iter()
        .filter_map(|k| {
            headers
                .get(*k)
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{k}={v}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_builder() {
        let headers = HttpHeaderBuilder::new()
            .with_bearer_auth("test-token")
            .unwrap()
            .with_json_content_type()
            .with_header("x-trace", "abc")
            .unwrap()
            .build();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer test-token");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("x-trace").unwrap(), "abc");
    }

    #[test]
    fn test_custom_headers_override() {
        let mut extra = HashMap::new();
        extra.insert("Anthropic-Version".to_string(), "2024-01-01".to_string());

        let headers = HttpHeaderBuilder::new()
            .with_header("anthropic-version", "2023-06-01")
            .unwrap()
            .with_custom_headers(&extra)
            .unwrap()
            .build();
        assert_eq!(headers.get("anthropic-version").unwrap(), "2024-01-01");
    }

    #[test]
    fn test_invalid_header_name() {
        let result = HttpHeaderBuilder::new().with_header("bad header", "x");
        assert!(matches!(result, Err(KaizenError::ConfigurationError(_))));
    }

    #[test]
    fn test_request_ids() {
        let headers = HttpHeaderBuilder::new()
            .with_header("x-request-id", "abc")
            .unwrap()
            .build();
        assert_eq!(request_ids(&headers), vec!["x-request-id=abc".to_string()]);
    }
}
