//! Gemini `generateContent` integration.

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
use crate::types::{HttpConfig, Prompt};

/// `POST {base}/{model}:generateContent` with `x-goog-api-key`.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    settings: ProviderSettings,
}

/// Resource-style model name: `gemini-2.5-flash` becomes `models/gemini-2.5-flash`.
pub fn model_resource(model: &str) -> String {
    let trimmed = model.trim().trim_start_matches('/');
    if trimmed.contains('/') {
        trimmed.to_string()
    } else {
        format!("models/{trimmed}")
    }
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            settings: ProviderSettings::new(api_key, defaults::GEMINI_BASE_URL, model),
        }
    }

    /// Key from `GOOGLE_API_KEY`; model from `model`, then `GOOGLE_MODEL`,
    /// then the default.
    pub fn from_env(model: Option<&str>) -> Result<Self> {
        let api_key = env::require_env(env::GOOGLE_API_KEY)?;
        let model = match model {
            Some(model) => model.to_string(),
            None => env::env_or(env::GOOGLE_MODEL, defaults::GEMINI_MODEL),
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

impl ChatProvider for GeminiProvider {
    fn id(&self) -> &'static str {
        "gemini"
    }

    fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        Ok(HttpHeaderBuilder::new()
            .with_api_key_header("x-goog-api-key", self.settings.api_key())?
            .with_json_content_type()
            .build())
    }

    fn chat_url(&self) -> String {
        self.settings.url(&format!(
            "{}:generateContent",
            model_resource(&self.settings.model)
        ))
    }

    fn build_body(&self, prompt: &ProviderPrompt<'_>, params: &ChatParams) -> Result<Value> {
        let mut body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt.encoded}]}],
        });
        if !prompt.system.is_empty() {
            let parts: Vec<Value> = prompt.system.iter().map(|t| json!({"text": t})).collect();
            body["systemInstruction"] = json!({"parts": parts});
        }

        let mut generation = serde_json::Map::new();
        if let Some(temperature) = params.temperature {
            generation.insert("temperature".into(), json!(temperature));
        }
        if let Some(max_tokens) = params.max_tokens {
            generation.insert("maxOutputTokens".into(), json!(max_tokens));
        }
        if !generation.is_empty() {
            body["generationConfig"] = Value::Object(generation);
        }
        merge_extra(&mut body, params);
        Ok(body)
    }

    fn extract_text(&self, response: &Value) -> Result<String> {
        let parts = response
            .pointer("/candidates/0/content/parts")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                KaizenError::ParseError("gemini: response has no candidates[0].content.parts".into())
            })?;
        join_text_parts(self.id(), parts)
    }
}

pub type GeminiKaizenWrapper = KaizenWrapper<GeminiProvider>;

impl KaizenWrapper<GeminiProvider> {
    /// Wrapper with the provider configured from the environment.
    pub fn gemini_from_env(client: KaizenClient, model: Option<&str>) -> Result<Self> {
        Self::new(client, GeminiProvider::from_env(model)?)
    }

    /// Run a full prompt.
    pub async fn invoke(&self, prompt: Prompt) -> Result<WrappedCompletion> {
        self.complete(prompt, ChatParams::default()).await
    }
}
