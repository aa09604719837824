//! OpenAI Chat Completions integration.

use reqwest::header::HeaderMap;
use serde_json::{Value, json};

use super::{
    ChatParams, ChatProvider, KaizenWrapper, ProviderPrompt, ProviderSettings, WrappedCompletion,
    merge_extra,
};
use crate::client::KaizenClient;
use crate::defaults::providers as defaults;
use crate::env;
use crate::error::{KaizenError, Result};
use crate::execution::http::HttpHeaderBuilder;
use crate::types::{HttpConfig, Prompt, PromptMessage};

/// `POST {base}/chat/completions` with bearer auth.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    settings: ProviderSettings,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            settings: ProviderSettings::new(api_key, defaults::OPENAI_BASE_URL, model),
        }
    }

    /// Key from `OPENAI_API_KEY`; model from `model`, then `OPENAI_MODEL`,
    /// then the default.
    pub fn from_env(model: Option<&str>) -> Result<Self> {
        let api_key = env::require_env(env::OPENAI_API_KEY)?;
        let model = match model {
            Some(model) => model.to_string(),
            None => env::env_or(env::OPENAI_MODEL, defaults::OPENAI_MODEL),
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
}

impl ChatProvider for OpenAiProvider {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        Ok(HttpHeaderBuilder::new()
            .with_bearer_auth(self.settings.api_key())?
            .with_json_content_type()
            .build())
    }

    fn chat_url(&self) -> String {
        self.settings.url("chat/completions")
    }

    fn build_body(&self, prompt: &ProviderPrompt<'_>, params: &ChatParams) -> Result<Value> {
        let mut messages: Vec<Value> = prompt
            .system
            .iter()
            .map(|content| json!({"role": "system", "content": content}))
            .collect();
        messages.push(json!({"role": "user", "content": prompt.encoded}));

        let mut body = json!({
            "model": self.settings.model,
            "messages": messages,
        });
        if let Some(temperature) = params.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = params.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        merge_extra(&mut body, params);
        Ok(body)
    }

    fn extract_text(&self, response: &Value) -> Result<String> {
        response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                KaizenError::ParseError("openai: response has no choices[0].message.content".into())
            })
    }
}

pub type OpenAiKaizenWrapper = KaizenWrapper<OpenAiProvider>;

impl KaizenWrapper<OpenAiProvider> {
    /// Wrapper with the provider configured from the environment.
    pub fn openai_from_env(client: KaizenClient, model: Option<&str>) -> Result<Self> {
        Self::new(client, OpenAiProvider::from_env(model)?)
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
