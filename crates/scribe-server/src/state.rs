use std::sync::Arc;

use scribe_llm::{create_provider, CompletionError, CompletionProvider, ProviderConfig};

pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, CompletionError> {
        let provider = create_provider(config)?;
        log::info!("Using completion provider: {}", provider.name());
        Ok(Self { provider })
    }
}
