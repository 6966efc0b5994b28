//! Provider selection and credentials.
//!
//! Everything is environment-supplied; the session core never reads
//! configuration directly — it receives an already-constructed provider.

use serde::{Deserialize, Serialize};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Which binding to use: "openai" or "huggingface".
    pub provider: String,
    #[serde(default)]
    pub openai: Option<OpenAIConfig>,
    #[serde(default)]
    pub huggingface: Option<HuggingFaceConfig>,
    /// Timeout applied at the network boundary. A hung remote call is
    /// converted to a failure here rather than inside the state machine.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            openai: None,
            huggingface: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// Build configuration from environment variables:
    /// - `SCRIBE_PROVIDER`: "openai" (default) or "huggingface"
    /// - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`
    /// - `HF_API_KEY`, `HF_BASE_URL`, `HF_MODEL`
    /// - `SCRIBE_REQUEST_TIMEOUT_SECS`: network timeout (default: 30)
    pub fn from_env() -> Self {
        let mut config = ProviderConfig::default();

        if let Ok(provider) = std::env::var("SCRIBE_PROVIDER") {
            if !provider.trim().is_empty() {
                config.provider = provider.trim().to_string();
            }
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.openai = Some(OpenAIConfig {
                api_key,
                base_url: non_empty_env("OPENAI_BASE_URL"),
                model: non_empty_env("OPENAI_MODEL"),
            });
        }

        if let Ok(api_key) = std::env::var("HF_API_KEY") {
            config.huggingface = Some(HuggingFaceConfig {
                api_key,
                base_url: non_empty_env("HF_BASE_URL"),
                model: non_empty_env("HF_MODEL"),
            });
        }

        if let Some(timeout) = std::env::var("SCRIBE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.request_timeout_secs = timeout;
        }

        config
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
