//! Missing credentials fail before any network call.
//!
//! Kept in its own test binary: it clears process-wide variables.

#![allow(unsafe_code)]

mod support;

use kaizen_client::env;
use kaizen_client::{KaizenClient, KaizenClientConfig};

#[test]
fn test_missing_provider_keys_fail_fast() {
    support::init();
    // SAFETY: the only test in this binary; no other thread reads the environment.
    unsafe {
        std::env::remove_var(env::OPENAI_API_KEY);
        std::env::remove_var(env::ANTHROPIC_API_KEY);
        std::env::set_var(env::GOOGLE_API_KEY, "   ");
    }

    let client = KaizenClient::new(KaizenClientConfig::default()).unwrap();

    #[cfg(feature = "openai")]
    {
        let err = kaizen_client::integrations::OpenAiKaizenWrapper::openai_from_env(
            client.clone(),
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "OPENAI_API_KEY must be set");
    }

    #[cfg(feature = "anthropic")]
    {
        let err = kaizen_client::integrations::AnthropicProvider::from_env(None).unwrap_err();
        assert!(matches!(err, kaizen_client::KaizenError::MissingEnvironment { ref name } if name == "ANTHROPIC_API_KEY"));
    }

    #[cfg(feature = "google")]
    {
        // Blank counts as missing.
        let err = kaizen_client::integrations::GeminiKaizenWrapper::gemini_from_env(client, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "GOOGLE_API_KEY must be set");
    }

    // SAFETY: as above.
    unsafe {
        std::env::set_var(env::ANTHROPIC_API_KEY, "sk-ant");
        std::env::set_var(env::ANTHROPIC_MODEL, "claude-3-haiku-20240307");
    }
    #[cfg(feature = "anthropic")]
    {
        use kaizen_client::integrations::ChatProvider;
        let provider = kaizen_client::integrations::AnthropicProvider::from_env(None).unwrap();
        assert_eq!(provider.model(), "claude-3-haiku-20240307");
        let provider =
            kaizen_client::integrations::AnthropicProvider::from_env(Some("claude-x")).unwrap();
        assert_eq!(provider.model(), "claude-x");
    }
}
