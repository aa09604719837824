//! Raw versus compressed size of one prompt, as reported by Kaizen and as
//! estimated locally.
//!
//! ```bash
//! cargo run --example cost_comparison
//! ```

use kaizen_client::prelude::*;
use kaizen_client::tokens::{TokenComparison, estimate_json_tokens, estimate_tokens};

const TOKEN_MODEL: &str = "gpt-4o";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _guard = kaizen_client::telemetry::init_from_env()?;
    let client = KaizenClient::from_env()?;

    let prompt = Prompt::new(vec![PromptMessage::user(
        "Summarize quarterly metrics in a table.",
    )])
    .with_metadata("source", "cost-demo");

    let encoded = client
        .prompts_encode(&EncodeRequest::new(prompt.clone()).with_token_model(TOKEN_MODEL))
        .await?;

    println!("--- Raw vs optimized bytes ---");
    println!("{}", serde_json::to_string_pretty(&encoded.stats)?);
    println!("--- Token stats reported by Kaizen for {TOKEN_MODEL} ---");
    println!(
        "{}",
        serde_json::to_string_pretty(&encoded.token_stats_for(TOKEN_MODEL))?
    );

    let local = TokenComparison::new(
        estimate_json_tokens(&prompt)?,
        estimate_tokens(&encoded.result),
    );
    println!(
        "Local token estimate -> raw: {}, optimized: {}, saved: {} ({:.1}%)",
        local.raw,
        local.optimized,
        local.saved(),
        local.ratio() * 100.0
    );

    client.close().await;
    Ok(())
}
