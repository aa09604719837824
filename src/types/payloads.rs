//! Request and response payloads of the Kaizen service.
//!
//! Every response keeps fields it does not model in a flattened `extra` map,
//! so nothing the service returns is dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::prompt::Prompt;

/// Body of `prompts/encode` and `optimize/request`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub prompt: Prompt,
    /// Models to report token statistics for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub token_models: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl EncodeRequest {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt,
            ..Default::default()
        }
    }

    pub fn with_token_model(mut self, model: impl Into<String>) -> Self {
        self.token_models.push(model.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Result of `prompts/encode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeResponse {
    /// Opaque ktof string
    pub result: String,
    #[serde(default)]
    pub stats: Option<Value>,
    /// Token statistics keyed by model name
    #[serde(default)]
    pub token_stats: Option<HashMap<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EncodeResponse {
    /// Token statistics reported for one model.
    pub fn token_stats_for(&self, model: &str) -> Option<&Value> {
        self.token_stats.as_ref().and_then(|stats| stats.get(model))
    }
}

/// Result of `optimize/request`.
///
/// The service may answer with statistics only, so `result` is optional and
/// kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub stats: Option<Value>,
    #[serde(default)]
    pub token_stats: Option<HashMap<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OptimizeResponse {
    /// The ktof string, when `result` carries one.
    pub fn ktof(&self) -> Option<&str> {
        self.result.as_ref().and_then(Value::as_str)
    }
}

/// Body of `prompts/decode` and `optimize/response`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeRequest {
    pub ktof: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl DecodeRequest {
    pub fn new(ktof: impl Into<String>) -> Self {
        Self {
            ktof: ktof.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Result of `prompts/decode` and `optimize/response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeResponse {
    /// Original-shaped JSON
    pub result: Value,
    #[serde(default)]
    pub stats: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `compress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressRequest {
    pub data: Value,
}

impl CompressRequest {
    pub fn new(data: impl Into<Value>) -> Self {
        Self { data: data.into() }
    }
}

/// Result of `compress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressResponse {
    pub result: String,
    #[serde(default)]
    pub stats: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `decompress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompressRequest {
    pub data: String,
}

impl DecompressRequest {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// Result of `decompress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompressResponse {
    /// `null` when the service omits it
    #[serde(default)]
    pub data: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Whatever the service reports: usually a string, sometimes a flag
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HealthStatus {
    /// `status` is `true`, or `ok`/`healthy` (case-insensitive).
    pub fn is_healthy(&self) -> bool {
        match &self.status {
            Some(Value::Bool(up)) => *up,
            Some(Value::String(s)) => {
                s.eq_ignore_ascii_case("ok") || s.eq_ignore_ascii_case("healthy")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptMessage;
    use serde_json::json;

    #[test]
    fn test_encode_request_wire_shape() {
        let req = EncodeRequest::new(Prompt::new(vec![PromptMessage::user("hi")]))
            .with_token_model("gpt-4o-mini")
            .with_metadata("example", "full-lifecycle");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "prompt": {"messages": [{"role": "user", "content": "hi"}]},
                "token_models": ["gpt-4o-mini"],
                "metadata": {"example": "full-lifecycle"}
            })
        );
    }

    #[test]
    fn test_encode_response_keeps_unknown_fields() {
        let resp: EncodeResponse = serde_json::from_value(json!({
            "result": "KTOF:abc",
            "stats": {"raw_bytes": 120, "optimized_bytes": 60},
            "token_stats": {"gpt-4o": {"raw": 30, "optimized": 14}},
            "request_id": "r-1"
        }))
        .unwrap();
        assert_eq!(resp.result, "KTOF:abc");
        assert_eq!(resp.token_stats_for("gpt-4o").unwrap()["optimized"], 14);
        assert!(resp.token_stats_for("gpt-4").is_none());
        assert_eq!(resp.extra["request_id"], "r-1");
    }

    #[test]
    fn test_encode_response_stats_optional() {
        let resp: EncodeResponse = serde_json::from_value(json!({"result": "x"})).unwrap();
        assert!(resp.stats.is_none());
        assert!(resp.token_stats.is_none());
    }

    #[test]
    fn test_health_status() {
        let ok: HealthStatus = serde_json::from_value(json!({"status": "OK", "version": "1.2"})).unwrap();
        assert!(ok.is_healthy());
        assert_eq!(ok.extra["version"], "1.2");
        assert!(!HealthStatus::default().is_healthy());

        let flag: HealthStatus = serde_json::from_value(json!({"status": true})).unwrap();
        assert!(flag.is_healthy());
        let down: HealthStatus = serde_json::from_value(json!({"status": "degraded"})).unwrap();
        assert!(!down.is_healthy());
    }

    #[test]
    fn test_optimize_response_stats_only() {
        let resp: OptimizeResponse =
            serde_json::from_value(json!({"stats": {"reduction_ratio": 0.4}})).unwrap();
        assert!(resp.result.is_none());
        assert!(resp.ktof().is_none());
        assert_eq!(resp.stats.unwrap()["reduction_ratio"], 0.4);
    }

    #[test]
    fn test_decompress_response_without_data() {
        let resp: DecompressResponse =
            serde_json::from_value(json!({"result": {"a": 1}})).unwrap();
        assert!(resp.data.is_null());
        assert_eq!(resp.extra["result"]["a"], 1);
    }
}
