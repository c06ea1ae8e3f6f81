use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-success HTTP status, with the response body for diagnostics.
    #[error("backend returned {code}: {body}")]
    Status { code: u16, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned no text")]
    EmptyResponse,
    #[error("attempt timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A remote text generator the cascade can try.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Stable identifier used in logs and attempt records.
    fn id(&self) -> &str;

    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String, BackendError>;
}
