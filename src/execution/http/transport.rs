//! JSON request/response transport over `reqwest`.
//!
//! Used by the Kaizen client and the provider wrappers alike, so interceptors,
//! request ids and error classification behave the same everywhere.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue};

use super::interceptor::{HttpInterceptor, HttpRequestContext};
use crate::defaults;
use crate::error::KaizenError;
use crate::retry_api::classify_http_error;

/// A single JSON call.
#[derive(Debug, Clone)]
pub struct JsonRequest {
    /// `kaizen` or a provider id; used in logs and error messages
    pub target: String,
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl JsonRequest {
    pub fn post(
        target: impl Into<String>,
        url: impl Into<String>,
        headers: HeaderMap,
        body: serde_json::Value,
    ) -> Self {
        Self {
            target: target.into(),
            method: Method::POST,
            url: url.into(),
            headers,
            body: Some(body),
        }
    }
}

/// Send `request` and decode the JSON body of a successful response.
pub async fn send_json(
    http: &reqwest::Client,
    interceptors: &[Arc<dyn HttpInterceptor>],
    request: JsonRequest,
) -> Result<serde_json::Value, KaizenError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let ctx = HttpRequestContext {
        target: request.target.clone(),
        method: request.method.clone(),
        url: request.url.clone(),
        request_id: request_id.clone(),
    };

    let mut headers = request.headers;
    headers.insert(
        defaults::http::REQUEST_ID_HEADER,
        HeaderValue::from_str(&request_id)?,
    );

    let mut builder = http
        .request(request.method.clone(), &request.url)
        .headers(headers.clone());
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }
    for interceptor in interceptors {
        builder = interceptor.on_before_send(&ctx, builder, request.body.as_ref(), &headers)?;
    }

    let started = Instant::now();
    let response = match builder.send().await {
        Ok(response) => response,
        Err(err) => {
            let error = KaizenError::from(err);
            notify_error(interceptors, &ctx, &error);
            return Err(error);
        }
    };

    let status = response.status();
    tracing::debug!(
        target: "kaizen_client::http",
        target_id = %ctx.target,
        method = %ctx.method,
        url = %ctx.url,
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );

    if !status.is_success() {
        let response_headers = response.headers().clone();
        let body_text = response.text().await.unwrap_or_default();
        let error = classify_http_error(&ctx.target, status.as_u16(), &body_text, &response_headers);
        notify_error(interceptors, &ctx, &error);
        return Err(error);
    }

    for interceptor in interceptors {
        interceptor.on_response(&ctx, &response)?;
    }

    let bytes = response.bytes().await.map_err(|e| {
        let error = KaizenError::HttpError(format!("Failed to read response body: {e}"));
        notify_error(interceptors, &ctx, &error);
        error
    })?;
    if bytes.is_empty() {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        let error = KaizenError::JsonError(format!("{}: invalid JSON response: {e}", ctx.target));
        notify_error(interceptors, &ctx, &error);
        error
    })
}

fn notify_error(
    interceptors: &[Arc<dyn HttpInterceptor>],
    ctx: &HttpRequestContext,
    error: &KaizenError,
) {
    for interceptor in interceptors {
        interceptor.on_error(ctx, error);
    }
}
