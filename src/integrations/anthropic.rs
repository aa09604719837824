//! Anthropic Messages integration.

use reqwest::header::HeaderMap;
use serde_json::{Value, json};

use super::{
    ChatParams, ChatProvider, KaizenWrapper, ProviderPrompt, ProviderSettings, WrappedCompletion,
    join_text_parts, merge_extra,
};
use crate::client::KaizenClient;
use crate::defaults::providers as defaults;
use crate::env;
use crate::error::{KaizenError, Result};
use crate::execution::http::HttpHeaderBuilder;
use crate::types::{HttpConfig, Prompt, PromptMessage};

/// `POST {base}/messages` with `x-api-key` and `anthropic-version`.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    settings: ProviderSettings,
    default_max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            settings: ProviderSettings::new(api_key, defaults::ANTHROPIC_BASE_URL, model),
            default_max_tokens: defaults::ANTHROPIC_MAX_TOKENS,
        }
    }

    /// Key from `ANTHROPIC_API_KEY`; model from `model`, then
    /// `ANTHROPIC_MODEL`, then the default.
    pub fn from_env(model: Option<&str>) -> Result<Self> {
        let api_key = env::require_env(env::ANTHROPIC_API_KEY)?;
        let model = match model {
            Some(model) => model.to_string(),
            None => env::env_or(env::ANTHROPIC_MODEL, defaults::ANTHROPIC_MODEL),
        };
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings.base_url = base_url.into();
        self
    }

    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.settings.http = http;
        self
    }

    /// `max_tokens` used when the call does not set one (the API requires it).
    pub fn with_default_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }
}

impl ChatProvider for AnthropicProvider {
    fn id(&self) -> &'static str {
        "anthropic"
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        Ok(HttpHeaderBuilder::new()
            .with_api_key_header("x-api-key", self.settings.api_key())?
            .with_header("anthropic-version", defaults::ANTHROPIC_VERSION)?
            .with_json_content_type()
            .build())
    }

    fn chat_url(&self) -> String {
        self.settings.url("messages")
    }

    fn build_body(&self, prompt: &ProviderPrompt<'_>, params: &ChatParams) -> Result<Value> {
        let mut body = json!({
            "model": self.settings.model,
            "max_tokens": params.max_tokens.unwrap_or(self.default_max_tokens),
            "messages": [{"role": "user", "content": prompt.encoded}],
        });
        // System messages are a top-level field here, not a role.
        if !prompt.system.is_empty() {
            body["system"] = json!(prompt.system.join("\n\n"));
        }
        if let Some(temperature) = params.temperature {
            body["temperature"] = json!(temperature);
        }
        merge_extra(&mut body, params);
        Ok(body)
    }

    fn extract_text(&self, response: &Value) -> Result<String> {
        let blocks = response
            .get("content")
            .and_then(Value::as_array)
            .ok_or_else(|| KaizenError::ParseError("anthropic: response has no content".into()))?;
        join_text_parts(
            self.id(),
            blocks
                .iter()
                .filter(|b| b.get("type").and_then(Value::as_str) == Some("text")),
        )
    }
}

pub type AnthropicKaizenWrapper = KaizenWrapper<AnthropicProvider>;

impl KaizenWrapper<AnthropicProvider> {
    /// Wrapper with the provider configured from the environment.
    pub fn anthropic_from_env(client: KaizenClient, model: Option<&str>) -> Result<Self> {
        Self::new(client, AnthropicProvider::from_env(model)?)
    }

    /// Chat over a message list.
    pub async fn chat(
        &self,
        messages: Vec<PromptMessage>,
        params: ChatParams,
    ) -> Result<WrappedCompletion> {
        self.complete(Prompt::new(messages), params).await
    }
}
