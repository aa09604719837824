//! Default values shared across the client and the provider integrations.

/// Kaizen service defaults
pub mod kaizen {
    /// Public Kaizen endpoint
    pub const BASE_URL: &str = "https://api.getkaizen.io/";
    /// Version segment appended to base URLs that do not already carry it
    pub const API_VERSION: &str = "v1";
}

/// HTTP transport defaults
pub mod http {
    use std::time::Duration;

    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &str = concat!("kaizen-client-rust/", env!("CARGO_PKG_VERSION"));
    /// Header carrying a per-request UUID
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// Provider defaults used by the integration wrappers
pub mod providers {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    pub const OPENAI_MODEL: &str = "gpt-4o-mini";

    pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
    pub const ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20240620";
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";
    pub const ANTHROPIC_MAX_TOKENS: u32 = 1024;

    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const GEMINI_MODEL: &str = "models/gemini-2.5-flash";
}
