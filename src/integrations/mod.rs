//! Provider integrations.
//!
//! A wrapper runs one conversation through Kaizen and a provider:
//!
//! 1. `prompts_encode` turns the prompt into ktof, with token stats for the
//!    provider's model.
//! 2. The provider gets the original system messages plus one user message
//!    carrying the ktof string.
//! 3. The reply text goes through `optimize_response`.
//!
//! Providers only describe their wire format through [`ChatProvider`];
//! [`KaizenWrapper`] owns the sequencing.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::Instrument;

use crate::client::KaizenClient;
use crate::error::{KaizenError, Result};
use crate::execution::http::{JsonRequest, build_http_client_from_config, send_json};
use crate::types::{DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse, HttpConfig, Prompt};

#[cfg(feature = "anthropic")]
pub mod anthropic;
#[cfg(feature = "google")]
pub mod gemini;
#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "anthropic")]
pub use anthropic::{AnthropicKaizenWrapper, AnthropicProvider};
#[cfg(feature = "google")]
pub use gemini::{GeminiKaizenWrapper, GeminiProvider};
#[cfg(feature = "openai")]
pub use openai::{OpenAiKaizenWrapper, OpenAiProvider};

/// Connection settings shared by every provider.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub http: HttpConfig,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("http", &self.http)
            .finish()
    }
}

impl ProviderSettings {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: base_url.into(),
            model: model.into(),
            http: HttpConfig::default(),
        }
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// `base_url` without trailing slashes, joined with `path`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Sampling parameters forwarded to the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Extra top-level body fields, copied verbatim
    pub extra: Map<String, Value>,
}

impl ChatParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// What a provider call is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPrompt<'a> {
    /// System messages of the original prompt, in order
    pub system: Vec<&'a str>,
    /// The ktof string produced by Kaizen
    pub encoded: &'a str,
}

/// Wire format of one provider's chat endpoint.
pub trait ChatProvider: Send + Sync {
    /// Short provider id used in logs, errors and decode metadata
    fn id(&self) -> &'static str;

    fn settings(&self) -> &ProviderSettings;

    fn model(&self) -> &str {
        &self.settings().model
    }

    fn build_headers(&self) -> Result<HeaderMap>;

    fn chat_url(&self) -> String;

    fn build_body(&self, prompt: &ProviderPrompt<'_>, params: &ChatParams) -> Result<Value>;

    /// Reply text from a successful response body.
    fn extract_text(&self, response: &Value) -> Result<String>;
}

/// Output of one wrapped call.
#[derive(Debug, Clone)]
pub struct WrappedCompletion {
    /// Kaizen encode result (ktof plus stats)
    pub encoded: EncodeResponse,
    /// Raw provider response body
    pub response: Value,
    /// Reply text extracted from `response`
    pub text: String,
    /// Kaizen `optimize_response` result for `text`
    pub decoded: DecodeResponse,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Object-safe view over any wrapper.
#[async_trait]
pub trait CompressedChat: Send + Sync {
    fn provider_id(&self) -> &'static str;

    async fn complete(&self, prompt: Prompt, params: ChatParams) -> Result<WrappedCompletion>;
}

/// Encode → provider chat → decode.
pub struct KaizenWrapper<P> {
    client: KaizenClient,
    provider: Arc<P>,
    http: reqwest::Client,
}

impl<P> Clone for KaizenWrapper<P> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            provider: self.provider.clone(),
            http: self.http.clone(),
        }
    }
}

impl<P: ChatProvider> std::fmt::Debug for KaizenWrapper<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KaizenWrapper")
            .field("provider", &self.provider.id())
            .field("model", &self.provider.model())
            .field("client", &self.client)
            .finish()
    }
}

impl<P: ChatProvider> KaizenWrapper<P> {
    /// Pair a Kaizen client with a provider. The provider gets its own HTTP
    /// client built from its settings.
    pub fn new(client: KaizenClient, provider: P) -> Result<Self> {
        let http = build_http_client_from_config(&provider.settings().http)?;
        Ok(Self {
            client,
            provider: Arc::new(provider),
            http,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn client(&self) -> &KaizenClient {
        &self.client
    }

    /// Run the full encode → chat → decode sequence.
    pub async fn complete(&self, prompt: Prompt, params: ChatParams) -> Result<WrappedCompletion> {
        let span = tracing::debug_span!(
            "kaizen_wrapper",
            provider = self.provider.id(),
            model = %self.provider.model()
        );
        self.run(prompt, params).instrument(span).await
    }

    async fn run(&self, prompt: Prompt, params: ChatParams) -> Result<WrappedCompletion> {
        let provider_id = self.provider.id();
        let model = self.provider.model().to_string();

        let encode_request = EncodeRequest::new(prompt.clone()).with_token_model(model.clone());
        let encoded = self.client.prompts_encode(&encode_request).await?;
        tracing::debug!(target: "kaizen_client::integrations", ktof_len = encoded.result.len(), "prompt encoded");

        let provider_prompt = ProviderPrompt {
            system: prompt.system_messages().map(|m| m.content.as_str()).collect(),
            encoded: &encoded.result,
        };
        let body = self.provider.build_body(&provider_prompt, &params)?;
        let request = JsonRequest::post(
            provider_id,
            self.provider.chat_url(),
            self.provider.build_headers()?,
            body,
        );
        let response = send_json(&self.http, self.client.interceptors(), request).await?;
        let text = self.provider.extract_text(&response)?;

        let decode_request = DecodeRequest::new(text.clone())
            .with_metadata("provider", provider_id)
            .with_metadata("model", model);
        let decoded = self.client.optimize_response(&decode_request).await?;

        Ok(WrappedCompletion {
            encoded,
            response,
            text,
            decoded,
            completed_at: chrono::Utc::now(),
        })
    }
}

#[async_trait]
impl<P: ChatProvider> CompressedChat for KaizenWrapper<P> {
    fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    async fn complete(&self, prompt: Prompt, params: ChatParams) -> Result<WrappedCompletion> {
        KaizenWrapper::<P>::complete(self, prompt, params).await
    }
}

/// Copy `params.extra` into a JSON object body.
pub(crate) fn merge_extra(body: &mut Value, params: &ChatParams) {
    if let Value::Object(map) = body {
        for (k, v) in &params.extra {
            map.insert(k.clone(), v.clone());
        }
    }
}

/// Concatenate the `text` fields of content parts, failing when none exist.
pub(crate) fn join_text_parts<'a>(
    provider_id: &str,
    parts: impl IntoIterator<Item = &'a Value>,
) -> Result<String> {
    let texts: Vec<&str> = parts
        .into_iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if texts.is_empty() {
        return Err(KaizenError::ParseError(format!(
            "{provider_id}: response contains no text"
        )));
    }
    Ok(texts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_url_join() {
        let settings = ProviderSettings::new("k", "https://api.openai.com/v1/", "gpt-4o-mini");
        assert_eq!(
            settings.url("/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert!(!format!("{settings:?}").contains("\"k\""));
    }

    #[test]
    fn test_merge_extra() {
        let mut body = json!({"model": "m"});
        merge_extra(&mut body, &ChatParams::new().extra("seed", 7));
        assert_eq!(body, json!({"model": "m", "seed": 7}));
    }

    #[test]
    fn test_join_text_parts() {
        let parts = [json!({"text": "a"}), json!({"inline": 1}), json!({"text": "b"})];
        assert_eq!(join_text_parts("gemini", parts.iter()).unwrap(), "ab");

        let err = join_text_parts("gemini", [json!({})].iter()).unwrap_err();
        assert!(matches!(err, KaizenError::ParseError(_)));
    }
}
