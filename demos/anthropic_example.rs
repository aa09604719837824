//! Kaizen encode/decode around a Claude Messages call.
//!
//! ```bash
//! export ANTHROPIC_API_KEY="sk-ant-..."
//! cargo run --example anthropic_example --features anthropic
//! ```

use kaizen_client::integrations::AnthropicKaizenWrapper;
use kaizen_client::env;
use kaizen_client::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _guard = kaizen_client::telemetry::init_from_env()?;
    env::require_env(env::ANTHROPIC_API_KEY)?;

    let client = KaizenClient::from_env()?;
    let wrapper = AnthropicKaizenWrapper::anthropic_from_env(client.clone(), None)?;

    let messages = vec![PromptMessage::user(
        "Draft a Kaizen release note in three bullet points.",
    )];
    let result = wrapper.chat(messages, ChatParams::new()).await?;

    println!("--- Kaizen encoded stats ---");
    println!("{}", serde_json::to_string_pretty(&result.encoded.stats)?);
    println!("--- Claude response decoded ---");
    println!("{}", serde_json::to_string_pretty(&result.decoded.result)?);

    client.close().await;
    Ok(())
}
