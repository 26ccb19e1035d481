//! OpenAI-compatible client configuration with sensible defaults.

use crate::config::LlmSettings;
use crate::error::{Result, TutorError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create a client from the `[llm]` settings.
///
/// Reads the API key from the configured environment variable and honours an
/// optional API base override, so any OpenAI-compatible endpoint can be used.
pub fn create_client(settings: &LlmSettings) -> Result<Client<OpenAIConfig>> {
    let mut config = OpenAIConfig::new();

    if let Ok(key) = std::env::var(&settings.api_key_env) {
        config = config.with_api_key(key);
    }
    if let Some(base) = settings.api_base.as_deref().filter(|b| !b.is_empty()) {
        config = config.with_api_base(base);
    }

    let timeout = match settings.timeout_secs {
        0 => DEFAULT_TIMEOUT_SECS,
        secs => secs,
    };
    create_client_with_timeout(config, Duration::from_secs(timeout))
}

/// Create a client with a custom timeout.
pub fn create_client_with_timeout(
    config: OpenAIConfig,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TutorError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(config).with_http_client(http_client))
}
