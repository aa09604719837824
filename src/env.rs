//! Environment variable helpers.
//!
//! Entry points that need a credential call [`require_env`] before doing any
//! network work, so a missing key fails immediately with a clear message.

use crate::error::{KaizenError, Result};

pub const KAIZEN_API_KEY: &str = "KAIZEN_API_KEY";
pub const KAIZEN_BASE_URL: &str = "KAIZEN_BASE_URL";
pub const KAIZEN_TIMEOUT_SECS: &str = "KAIZEN_TIMEOUT_SECS";

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_MODEL: &str = "ANTHROPIC_MODEL";
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const GOOGLE_MODEL: &str = "GOOGLE_MODEL";

pub const KAIZEN_LOG_LEVEL: &str = "KAIZEN_LOG_LEVEL";
pub const KAIZEN_LOG_FORMAT: &str = "KAIZEN_LOG_FORMAT";
pub const KAIZEN_LOG_FILE: &str = "KAIZEN_LOG_FILE";

/// Read an environment variable, treating blank values as unset.
pub fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable that must be present.
pub fn require_env(name: &str) -> Result<String> {
    optional_env(name).ok_or_else(|| KaizenError::missing_env(name))
}

/// Read a variable, falling back to `default`.
pub fn env_or(name: &str, default: &str) -> String {
    optional_env(name).unwrap_or_else(|| default.to_string())
}
