//! AI backend adapters

mod ollama;
mod openai;

pub use ollama::OllamaBackend;
pub use openai::{OpenAiBackend, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::application::ports::{BackendClient, BackendError};
use crate::domain::pipeline::TransformRequest;
use crate::domain::shortcut::BackendKind;

/// Dispatches each request to the backend its shortcut names.
///
/// The OpenAI client only exists when an API key was configured;
/// requests routed to it without one fail with a missing-key error
/// instead of a confusing 401 from the API.
pub struct BackendRouter {
    openai: Option<OpenAiBackend>,
    ollama: OllamaBackend,
}

impl BackendRouter {
    pub fn new(openai_api_key: Option<String>, ollama_base_url: impl Into<String>) -> Self {
        Self {
            openai: openai_api_key.map(OpenAiBackend::new),
            ollama: OllamaBackend::new(ollama_base_url),
        }
    }
}

#[async_trait]
impl BackendClient for BackendRouter {
    async fn complete(&self, request: &TransformRequest) -> Result<String, BackendError> {
        match request.backend {
            BackendKind::OpenAi => match &self.openai {
                Some(client) => client.complete(request).await,
                None => Err(BackendError::MissingApiKey),
            },
            BackendKind::Ollama => self.ollama.complete(request).await,
        }
    }
}
