//! End-to-end tour of the Kaizen service: encode, decode, optimize,
//! compress and health.
//!
//! ```bash
//! export KAIZEN_API_KEY="kz-..."
//! cargo run --example full_lifecycle
//! ```

use kaizen_client::env;
use kaizen_client::prelude::*;
use serde_json::json;

fn show(title: &str, value: &impl serde::Serialize) -> Result<()> {
    println!("\n=== {title} ===");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _guard = kaizen_client::telemetry::init_from_env()?;

    // Fail before any network call when the key is missing.
    env::require_env(env::KAIZEN_API_KEY)?;
    let client = KaizenClient::from_env()?;

    let prompt = Prompt::new(vec![
        PromptMessage::system("You are Kaizen's technical writer."),
        PromptMessage::user("Summarize the savings this prompt would get."),
    ])
    .with_metadata("source", "full-lifecycle");

    let encoded = client
        .prompts_encode(
            &EncodeRequest::new(prompt.clone())
                .with_token_model("gpt-4o-mini")
                .with_metadata("example", "full-lifecycle"),
        )
        .await?;
    show(
        "prompts.encode => ktof result + stats",
        &json!({
            "result": encoded.result,
            "stats": encoded.stats,
            "token_stats": encoded.token_stats,
        }),
    )?;

    let decoded = client
        .prompts_decode(&DecodeRequest::new(encoded.result.clone()))
        .await?;
    show("prompts.decode => hydrate ktof back into JSON", &decoded.result)?;

    let optimized = client
        .optimize_request(&EncodeRequest::new(prompt.clone()).with_token_model("gpt-4o-mini"))
        .await?;
    show("optimize.request => compress before provider call", &optimized.stats)?;

    let reply = client
        .optimize_response(&DecodeRequest::new(encoded.result.clone()))
        .await?;
    show("optimize.response => decompress provider reply", &reply.result)?;

    let compressed = client.compress(&CompressRequest::new(serde_json::to_value(&prompt)?)).await?;
    show("compress => generic data helper", &compressed.stats)?;
    let restored = client
        .decompress(&DecompressRequest::new(compressed.result))
        .await?;
    show("decompress => original data", &restored.data)?;

    let health = client.health().await?;
    show("health check", &health)?;

    client.close().await;
    Ok(())
}
