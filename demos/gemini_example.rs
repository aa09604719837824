//! Wrap a Gemini `generateContent` call with Kaizen.
//!
//! ```bash
//! export GOOGLE_API_KEY="..."
//! cargo run --example gemini_example --features google
//! ```

use kaizen_client::integrations::GeminiKaizenWrapper;
use kaizen_client::env;
use kaizen_client::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _guard = kaizen_client::telemetry::init_from_env()?;
    env::require_env(env::GOOGLE_API_KEY)?;

    let client = KaizenClient::from_env()?;
    // GOOGLE_MODEL overrides the default models/gemini-2.5-flash.
    let wrapper = GeminiKaizenWrapper::gemini_from_env(client.clone(), None)?;

    let prompt = Prompt::new(vec![PromptMessage::user("Summarize the attached report.")]);
    let result = wrapper.invoke(prompt).await?;

    println!("--- Kaizen encoded stats ---");
    println!("{}", serde_json::to_string_pretty(&result.encoded.stats)?);
    println!("--- Gemini response decoded ---");
    println!("{}", serde_json::to_string_pretty(&result.decoded.result)?);

    client.close().await;
    Ok(())
}
