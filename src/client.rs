//! Kaizen service client.
//!
//! Every method is a thin pass-through to one remote endpoint: serialize the
//! payload, POST (or GET) it under the API root, decode the JSON answer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::KaizenClientConfig;
use crate::error::{KaizenError, Result};
use crate::execution::http::{
    HttpHeaderBuilder, HttpInterceptor, JsonRequest, build_http_client_from_config, send_json,
};
use crate::retry_api::maybe_retry;
use crate::types::{
    CompressRequest, CompressResponse, DecodeRequest, DecodeResponse, DecompressRequest,
    DecompressResponse, EncodeRequest, EncodeResponse, HealthStatus, OptimizeResponse,
};

/// Service endpoints, relative to the API root.
pub mod endpoints {
    pub const PROMPTS_ENCODE: &str = "prompts/encode";
    pub const PROMPTS_DECODE: &str = "prompts/decode";
    pub const OPTIMIZE_REQUEST: &str = "optimize/request";
    pub const OPTIMIZE_RESPONSE: &str = "optimize/response";
    pub const COMPRESS: &str = "compress";
    pub const DECOMPRESS: &str = "decompress";
    pub const HEALTH: &str = "health";
}

struct ClientInner {
    config: KaizenClientConfig,
    http: reqwest::Client,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    closed: AtomicBool,
}

/// Async client for the Kaizen service.
///
/// Cheap to clone; clones share the connection pool and the closed flag.
#[derive(Clone)]
pub struct KaizenClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for KaizenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KaizenClient")
            .field("api_root", &self.inner.config.api_root())
            .field("has_api_key", &self.inner.config.api_key.is_some())
            .field("interceptors", &self.inner.interceptors.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl KaizenClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: KaizenClientConfig) -> Result<Self> {
        let http = build_http_client_from_config(&config.http)?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client from `KAIZEN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(KaizenClientConfig::from_env()?)
    }

    /// Reuse an existing `reqwest::Client`.
    pub fn with_http_client(config: KaizenClientConfig, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                http,
                interceptors: Vec::new(),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Install interceptors, run in order for every request.
    ///
    /// Returns a new handle; existing clones keep their interceptors.
    pub fn with_interceptors(self, interceptors: Vec<Arc<dyn HttpInterceptor>>) -> Self {
        let inner = &self.inner;
        Self {
            inner: Arc::new(ClientInner {
                config: inner.config.clone(),
                http: inner.http.clone(),
                interceptors,
                closed: AtomicBool::new(inner.closed.load(Ordering::SeqCst)),
            }),
        }
    }

    pub fn config(&self) -> &KaizenClientConfig {
        &self.inner.config
    }

    pub(crate) fn interceptors(&self) -> &[Arc<dyn HttpInterceptor>] {
        &self.inner.interceptors
    }

    /// Compress a prompt into ktof and report size/token statistics.
    pub async fn prompts_encode(&self, request: &EncodeRequest) -> Result<EncodeResponse> {
        self.post(endpoints::PROMPTS_ENCODE, request).await
    }

    /// Hydrate a ktof string back into the original JSON.
    pub async fn prompts_decode(&self, request: &DecodeRequest) -> Result<DecodeResponse> {
        self.post(endpoints::PROMPTS_DECODE, request).await
    }

    /// Compress a prompt before it is sent to a provider.
    pub async fn optimize_request(&self, request: &EncodeRequest) -> Result<OptimizeResponse> {
        self.post(endpoints::OPTIMIZE_REQUEST, request).await
    }

    /// Decompress a provider reply.
    pub async fn optimize_response(&self, request: &DecodeRequest) -> Result<DecodeResponse> {
        self.post(endpoints::OPTIMIZE_RESPONSE, request).await
    }

    /// Compress arbitrary JSON data.
    pub async fn compress(&self, request: &CompressRequest) -> Result<CompressResponse> {
        self.post(endpoints::COMPRESS, request).await
    }

    /// Restore data produced by [`KaizenClient::compress`].
    pub async fn decompress(&self, request: &DecompressRequest) -> Result<DecompressResponse> {
        self.post(endpoints::DECOMPRESS, request).await
    }

    /// Service health.
    pub async fn health(&self) -> Result<HealthStatus> {
        let value = self.call(Method::GET, endpoints::HEALTH, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send raw JSON to any endpoint path under the API root.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        self.ensure_open()?;
        let url = self.inner.config.endpoint_url(path);
        let headers = self.build_headers()?;
        tracing::debug!(target: "kaizen_client::client", %method, path, "calling kaizen");

        let http = &self.inner.http;
        let interceptors = self.inner.interceptors.as_slice();
        maybe_retry(self.inner.config.retry.clone(), || {
            let request = JsonRequest {
                target: "kaizen".to_string(),
                method: method.clone(),
                url: url.clone(),
                headers: headers.clone(),
                body: payload.clone(),
            };
            send_json(http, interceptors, request)
        })
        .await
    }

    /// Mark the client closed. Later calls fail with [`KaizenError::ClientClosed`].
    ///
    /// Idempotent; affects every clone of this handle.
    pub async fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!(target: "kaizen_client::client", "client closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    async fn post<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_value(request)?;
        let value = self.call(Method::POST, path, Some(payload)).await?;
        serde_json::from_value(value).map_err(|e| {
            KaizenError::ParseError(format!("Unexpected response shape from '{path}': {e}"))
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(KaizenError::ClientClosed)
        } else {
            Ok(())
        }
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap> {
        let mut builder = HttpHeaderBuilder::new().with_json_content_type();
        if let Some(key) = self.inner.config.api_key_str() {
            builder = builder.with_bearer_auth(key)?;
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_close_is_idempotent_and_shared() {
        let client = KaizenClient::new(KaizenClientConfig::default()).unwrap();
        let clone = client.clone();
        client.close().await;
        client.close().await;
        assert!(clone.is_closed());

        let err = clone.health().await.unwrap_err();
        assert!(matches!(err, KaizenError::ClientClosed));
    }

    #[test]
    fn test_headers_without_api_key() {
        let client = KaizenClient::new(KaizenClientConfig::default()).unwrap();
        let headers = client.build_headers().unwrap();
        assert!(headers.get(reqwest::header::AUTHORIZATION).is_none());
        assert_eq!(
            headers.get(reqwest::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_call_is_traced_without_secrets() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
            .mount(&server)
            .await;

        let config = KaizenClientConfig::builder()
            .base_url(server.uri())
            .api_key("kz-secret-value")
            .build()
            .unwrap();
        let client = KaizenClient::new(config)
            .unwrap()
            .with_interceptors(vec![
                Arc::new(crate::execution::http::LoggingInterceptor) as Arc<dyn HttpInterceptor>
            ]);
        client.health().await.unwrap();

        assert!(logs_contain("calling kaizen"));
        assert!(logs_contain("sending request"));
        assert!(logs_contain("request completed"));
        assert!(!logs_contain("kz-secret-value"));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = KaizenClientConfig::builder().api_key("kz-123").build().unwrap();
        let client = KaizenClient::new(config).unwrap();
        assert!(!format!("{client:?}").contains("kz-123"));
    }
}
