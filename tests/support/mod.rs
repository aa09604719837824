//! Shared test setup.

#![allow(dead_code)]

use std::sync::Once;

use kaizen_client::{KaizenClient, KaizenClientConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

static INIT: Once = Once::new();

/// Install a debug subscriber once per test binary; repeat calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        let _ = kaizen_client::telemetry::init_debug();
    });
}

/// Client pointed at the mock server, with the `/v1` root appended.
pub fn client_for(server: &MockServer) -> KaizenClient {
    init();
    let config = KaizenClientConfig::builder()
        .base_url(server.uri())
        .api_key("kz-test")
        .build()
        .unwrap();
    KaizenClient::new(config).unwrap()
}

pub fn encode_response(ktof: &str) -> Value {
    json!({
        "result": ktof,
        "stats": {"original_bytes": 512, "compressed_bytes": 128, "reduction_ratio": 0.75},
        "token_stats": {"gpt-4o-mini": {"original": 120, "compressed": 34}},
        "request_id": "req_01"
    })
}

pub fn decode_response(text: &str) -> Value {
    json!({
        "result": {"text": text},
        "stats": {"hydrated_bytes": text.len()}
    })
}
