//! Text-generation backend interface used by the advisory service.
use async_trait::async_trait;
use thiserror::Error;

/// Backend-layer errors.
///
/// Kept separate from `AppError` so the advisory service can decide whether a
/// failure is masked (degraded mode) or surfaced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation backend api key is not set")]
    MissingApiKey,
    #[error("failed to generate content: {0}")]
    Failed(String),
    #[error("empty response from generation backend")]
    EmptyResponse,
}

#[async_trait]
pub trait AdvisoryBackend: Send + Sync {
    // Backend name (for logging).
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
