//! Shared types: HTTP configuration, prompts, and service payloads.

pub mod http;
pub mod payloads;
pub mod prompt;

pub use http::{HttpConfig, HttpConfigBuilder};
pub use payloads::*;
pub use prompt::{Prompt, PromptMessage, Role};
