//! HTTP Interceptor interfaces
//!
//! Interceptors can observe and tweak request builders before send, observe
//! responses, and be notified of errors. The hooks are best-effort and should
//! avoid expensive work.

use crate::error::KaizenError;
use reqwest::header::HeaderMap;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    /// `kaizen` for service calls, the provider id for wrapper calls
    pub target: String,
    pub method: reqwest::Method,
    pub url: String,
    pub request_id: String,
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Return the (possibly modified) builder
    /// or an error to short-circuit the request.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
        _body: Option<&serde_json::Value>,
        _headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, KaizenError> {
        Ok(builder)
    }

    /// Called after a successful response is received.
    fn on_response(
        &self,
        _ctx: &HttpRequestContext,
        _response: &reqwest::Response,
    ) -> Result<(), KaizenError> {
        Ok(())
    }

    /// Called when sending or classification fails.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &KaizenError) {}
}

/// A simple logging interceptor backed by `tracing` (no sensitive data).
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
        _body: Option<&serde_json::Value>,
        _headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, KaizenError> {
        tracing::debug!(target: "kaizen_client::http", target_id=%ctx.target, method=%ctx.method, url=%ctx.url, request_id=%ctx.request_id, "sending request");
        Ok(builder)
    }

    fn on_response(
        &self,
        ctx: &HttpRequestContext,
        response: &reqwest::Response,
    ) -> Result<(), KaizenError> {
        tracing::debug!(target: "kaizen_client::http", target_id=%ctx.target, url=%ctx.url, status=%response.status().as_u16(), "response received");
        Ok(())
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &KaizenError) {
        tracing::debug!(target: "kaizen_client::http", target_id=%ctx.target, url=%ctx.url, err=%error, "request error");
    }
}
