use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::provider::{
    CompletionError, CompletionProvider, Continuation, ContinuationRequest, Result,
};

/// Binding for a Hugging Face style open-model inference host. Unlike the
/// hosted chat API this is a raw text-generation endpoint: the prompt is the
/// document text itself and cold starts surface as HTTP 503 while the model
/// loads.
pub struct HuggingFaceProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl HuggingFaceProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
            api_key: api_key.into(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: "gpt2-large".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

/// The inference API may echo the prompt ahead of the continuation even when
/// `return_full_text` is off (older deployments). Strip it when present.
fn strip_prompt_echo(generated: &str, prompt: &str) -> String {
    generated
        .strip_prefix(prompt)
        .unwrap_or(generated)
        .to_string()
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
    async fn complete(&self, request: &ContinuationRequest) -> Result<Continuation> {
        let body = json!({
            "inputs": request.text,
            "parameters": {
                "max_new_tokens": request.max_tokens,
                "return_full_text": false,
            },
        });

        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            // Cold start: the host reports how long the model needs to load.
            let text = response.text().await?;
            let message = match serde_json::from_str::<InferenceError>(&text) {
                Ok(parsed) => match parsed.estimated_time {
                    Some(secs) => format!("{} (estimated {:.0}s)", parsed.error, secs),
                    None => parsed.error,
                },
                Err(_) => text,
            };
            return Err(CompletionError::ModelLoading(message));
        }

        if !status.is_success() {
            let text = response.text().await?;
            return Err(CompletionError::Api(format!("HTTP {}: {}", status, text)));
        }

        let parsed: Vec<GeneratedText> = response.json().await?;
        let generated = parsed
            .into_iter()
            .next()
            .map(|item| strip_prompt_echo(&item.generated_text, &request.text))
            .unwrap_or_default();

        if generated.is_empty() {
            return Err(CompletionError::Api(
                "response contained no generated text".to_string(),
            ));
        }

        Ok(Continuation { text: generated })
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}
