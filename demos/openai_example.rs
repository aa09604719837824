//! Compress a prompt with Kaizen before sending it to OpenAI.
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! cargo run --example openai_example --features openai
//! ```

use kaizen_client::integrations::OpenAiKaizenWrapper;
use kaizen_client::env;
use kaizen_client::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _guard = kaizen_client::telemetry::init_from_env()?;
    env::require_env(env::OPENAI_API_KEY)?;

    let client = KaizenClient::from_env()?;
    // Reads OPENAI_API_KEY (required) and OPENAI_MODEL.
    let wrapper = OpenAiKaizenWrapper::openai_from_env(client.clone(), None)?;

    let messages = vec![
        PromptMessage::system("You are concise."),
        PromptMessage::user("List 3 Kaizen benefits."),
    ];
    let result = wrapper
        .chat(messages, ChatParams::new().temperature(0.0))
        .await?;

    println!("--- Kaizen stats before hitting OpenAI ---");
    println!("{}", serde_json::to_string_pretty(&result.encoded.stats)?);
    println!("--- Decoded provider response ---");
    println!("{}", serde_json::to_string_pretty(&result.decoded.result)?);

    client.close().await;
    Ok(())
}
