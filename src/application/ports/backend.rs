//! Completion backend port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::pipeline::TransformRequest;

/// Backend call errors
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed (check your API key)")]
    Auth,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Request timed out")]
    Timeout,

    #[error("Failed to parse backend response: {0}")]
    Malformed(String),

    #[error("Backend returned an empty completion")]
    EmptyCompletion,

    #[error("Backend error: {0}")]
    Api(String),

    #[error("OpenAI API key not configured. Set OPENAI_API_KEY or settings.openai_api_key")]
    MissingApiKey,
}

/// Port for text completion backends.
///
/// One call per pipeline run; no retries. A failed call surfaces
/// immediately to the orchestrator, which owns all user-facing policy.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Run one completion and return the transformed text.
    ///
    /// Empty or whitespace-only output is an error, never a success:
    /// replacing a selection with nothing is a user-visible bug.
    async fn complete(&self, request: &TransformRequest) -> Result<String, BackendError>;
}

/// Blanket implementation for boxed backend types
#[async_trait]
impl BackendClient for Box<dyn BackendClient> {
    async fn complete(&self, request: &TransformRequest) -> Result<String, BackendError> {
        self.as_ref().complete(request).await
    }
}
