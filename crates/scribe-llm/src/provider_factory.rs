//! Provider Factory
//!
//! Creates completion providers based on configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::provider::{CompletionError, CompletionProvider};
use crate::providers::{HuggingFaceProvider, OpenAIProvider};

/// Available provider types
pub const AVAILABLE_PROVIDERS: &[&str] = &["openai", "huggingface"];

/// Create a provider based on the given configuration.
pub fn create_provider(
    config: &ProviderConfig,
) -> Result<Arc<dyn CompletionProvider>, CompletionError> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    match config.provider.as_str() {
        "openai" => {
            let openai_config = config
                .openai
                .as_ref()
                .ok_or_else(|| CompletionError::Auth("OpenAI configuration required".to_string()))?;

            if openai_config.api_key.is_empty() {
                return Err(CompletionError::Auth("OpenAI API key is required".to_string()));
            }

            let mut provider = OpenAIProvider::with_timeout(&openai_config.api_key, timeout);

            if let Some(base_url) = &openai_config.base_url {
                if !base_url.is_empty() {
                    provider = provider.with_base_url(base_url);
                }
            }

            if let Some(model) = &openai_config.model {
                if !model.is_empty() {
                    provider = provider.with_model(model);
                }
            }

            Ok(Arc::new(provider))
        }

        "huggingface" => {
            let hf_config = config.huggingface.as_ref().ok_or_else(|| {
                CompletionError::Auth("Hugging Face configuration required".to_string())
            })?;

            if hf_config.api_key.is_empty() {
                return Err(CompletionError::Auth(
                    "Hugging Face API key is required".to_string(),
                ));
            }

            let mut provider = HuggingFaceProvider::with_timeout(&hf_config.api_key, timeout);

            if let Some(base_url) = &hf_config.base_url {
                if !base_url.is_empty() {
                    provider = provider.with_base_url(base_url);
                }
            }

            if let Some(model) = &hf_config.model {
                if !model.is_empty() {
                    provider = provider.with_model(model);
                }
            }

            Ok(Arc::new(provider))
        }

        _ => Err(CompletionError::Auth(format!(
            "Unknown provider: {}. Available providers: {}",
            config.provider,
            AVAILABLE_PROVIDERS.join(", ")
        ))),
    }
}

/// Validate provider configuration without creating the provider.
pub fn validate_provider_config(config: &ProviderConfig) -> Result<(), CompletionError> {
    match config.provider.as_str() {
        "openai" => {
            let openai_config = config
                .openai
                .as_ref()
                .ok_or_else(|| CompletionError::Auth("OpenAI configuration required".to_string()))?;

            if openai_config.api_key.is_empty() {
                return Err(CompletionError::Auth("OpenAI API key is required".to_string()));
            }

            Ok(())
        }

        "huggingface" => {
            let hf_config = config.huggingface.as_ref().ok_or_else(|| {
                CompletionError::Auth("Hugging Face configuration required".to_string())
            })?;

            if hf_config.api_key.is_empty() {
                return Err(CompletionError::Auth(
                    "Hugging Face API key is required".to_string(),
                ));
            }

            Ok(())
        }

        _ => Err(CompletionError::Auth(format!(
            "Unknown provider: {}",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HuggingFaceConfig, OpenAIConfig};

    #[test]
    fn create_openai_provider_without_config_fails() {
        let config = ProviderConfig {
            provider: "openai".to_string(),
            ..ProviderConfig::default()
        };

        let result = create_provider(&config);
        match result {
            Err(CompletionError::Auth(msg)) => {
                assert!(msg.contains("OpenAI configuration required"));
            }
            _ => panic!("Expected Auth error"),
        }
    }

    #[test]
    fn create_openai_provider_with_empty_key_fails() {
        let config = ProviderConfig {
            provider: "openai".to_string(),
            openai: Some(OpenAIConfig {
                api_key: "".to_string(),
                base_url: None,
                model: None,
            }),
            ..ProviderConfig::default()
        };

        let result = create_provider(&config);
        match result {
            Err(CompletionError::Auth(msg)) => {
                assert!(msg.contains("API key is required"));
            }
            _ => panic!("Expected Auth error"),
        }
    }

    #[test]
    fn create_openai_provider_success() {
        let config = ProviderConfig {
            provider: "openai".to_string(),
            openai: Some(OpenAIConfig {
                api_key: "sk-test123".to_string(),
                base_url: Some("https://custom.openai.com/v1".to_string()),
                model: Some("gpt-4o".to_string()),
            }),
            ..ProviderConfig::default()
        };

        let provider = create_provider(&config).expect("provider should build");
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn create_huggingface_provider_success() {
        let config = ProviderConfig {
            provider: "huggingface".to_string(),
            huggingface: Some(HuggingFaceConfig {
                api_key: "hf_test123".to_string(),
                base_url: None,
                model: Some("mistralai/Mistral-7B-v0.1".to_string()),
            }),
            ..ProviderConfig::default()
        };

        let provider = create_provider(&config).expect("provider should build");
        assert_eq!(provider.name(), "huggingface");
    }

    #[test]
    fn create_unknown_provider_fails() {
        let config = ProviderConfig {
            provider: "unknown".to_string(),
            ..ProviderConfig::default()
        };

        let result = create_provider(&config);
        match result {
            Err(CompletionError::Auth(msg)) => {
                assert!(msg.contains("Unknown provider"));
            }
            _ => panic!("Expected Auth error"),
        }
    }

    #[test]
    fn validate_reports_missing_huggingface_config() {
        let config = ProviderConfig {
            provider: "huggingface".to_string(),
            ..ProviderConfig::default()
        };

        assert!(validate_provider_config(&config).is_err());
    }

    #[test]
    fn validate_accepts_complete_config() {
        let config = ProviderConfig {
            provider: "openai".to_string(),
            openai: Some(OpenAIConfig {
                api_key: "sk-test".to_string(),
                base_url: None,
                model: None,
            }),
            ..ProviderConfig::default()
        };

        assert!(validate_provider_config(&config).is_ok());
    }
}
