//! # kaizen-client
//!
//! Async client for the Kaizen prompt-compression service, plus wrappers
//! that run OpenAI, Anthropic and Gemini chats through Kaizen.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use kaizen_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     // Reads KAIZEN_API_KEY and KAIZEN_BASE_URL
//!     let client = KaizenClient::from_env()?;
//!
//!     let prompt = Prompt::new(vec![
//!         PromptMessage::system("You are concise."),
//!         PromptMessage::user("List three benefits of prompt compression."),
//!     ]);
//!     let encoded = client
//!         .prompts_encode(&EncodeRequest::new(prompt).with_token_model("gpt-4o-mini"))
//!         .await?;
//!     println!("ktof: {}", encoded.result);
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Provider wrappers
//!
//! ```rust,no_run
//! # #[cfg(feature = "openai")]
//! # async fn demo() -> kaizen_client::Result<()> {
//! use kaizen_client::prelude::*;
//! use kaizen_client::integrations::OpenAiKaizenWrapper;
//!
//! let wrapper = OpenAiKaizenWrapper::openai_from_env(KaizenClient::from_env()?, None)?;
//! let completion = wrapper
//!     .chat(vec![PromptMessage::user("Summarize this report.")], ChatParams::new())
//!     .await?;
//! println!("{}", completion.decoded.result);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod defaults;
pub mod env;
pub mod error;
pub mod execution;
pub mod integrations;
pub mod retry;
pub mod retry_api;
pub mod telemetry;
pub mod tokens;
pub mod types;

pub use client::KaizenClient;
pub use config::{KaizenClientConfig, KaizenClientConfigBuilder};
pub use error::{ErrorCategory, KaizenError, Result};

/// Commonly used types.
pub mod prelude {
    pub use crate::client::KaizenClient;
    pub use crate::config::KaizenClientConfig;
    pub use crate::error::{KaizenError, Result};
    pub use crate::integrations::{ChatParams, ChatProvider, CompressedChat, KaizenWrapper};
    pub use crate::retry_api::RetryOptions;
    pub use crate::types::{
        CompressRequest, DecodeRequest, DecompressRequest, EncodeRequest, HttpConfig, Prompt,
        PromptMessage, Role,
    };
}
