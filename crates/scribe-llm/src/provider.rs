use async_trait::async_trait;
use thiserror::Error;

/// Token budget used when the caller does not specify one.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Model is loading: {0}")]
    ModelLoading(String),
}

pub type Result<T> = std::result::Result<T, CompletionError>;

/// One continuation request, built fresh from the document snapshot on every
/// accepted submission. `text` is guaranteed non-empty after trimming by the
/// session guard upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuationRequest {
    pub text: String,
    pub max_tokens: u32,
}

impl ContinuationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A successful continuation, already normalized by the binding layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Continuation {
    pub text: String,
}

/// The remote text-completion collaborator. Bindings own prompt formatting,
/// response-shape normalization and error classification; callers only see
/// the request/response shape.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &ContinuationRequest) -> Result<Continuation>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
