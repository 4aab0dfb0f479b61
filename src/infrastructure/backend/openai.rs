//! OpenAI chat-completions backend adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::ports::{BackendClient, BackendError};
use crate::domain::pipeline::TransformRequest;

/// OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Request timeout for chat completions
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Ceiling on response tokens unless the shortcut overrides it
const DEFAULT_MAX_TOKENS: u32 = 1024;

// Request types for the chat completions API

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

// Response types

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-style chat completions client
pub struct OpenAiBackend {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiBackend {
    /// Create a client against the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (proxies, tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Override the total request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Prompt goes in the system message, the selection in the user message
    fn build_request(request: &TransformRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.text.clone(),
                },
            ],
            max_tokens: request.options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.options.temperature,
            extra: request.options.extra.clone(),
        }
    }

    fn extract_text(response: &ChatCompletionResponse) -> Option<String> {
        response
            .choices
            .as_ref()?
            .first()?
            .message
            .content
            .clone()
    }
}

#[async_trait]
impl BackendClient for OpenAiBackend {
    async fn complete(&self, request: &TransformRequest) -> Result<String, BackendError> {
        let body = Self::build_request(request);

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else {
                    BackendError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BackendError::Auth);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(BackendError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        // The total request timeout can also fire mid body read
        let response: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::Malformed(e.to_string())
            }
        })?;

        let text = Self::extract_text(&response).ok_or(BackendError::EmptyCompletion)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(BackendError::EmptyCompletion);
        }

        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shortcut::{BackendKind, BackendOptions};
    use serde_json::json;

    fn request(options: BackendOptions) -> TransformRequest {
        TransformRequest {
            backend: BackendKind::OpenAi,
            text: "helo wrold".to_string(),
            prompt: "Fix grammar".to_string(),
            model: "gpt-4o".to_string(),
            options,
        }
    }

    #[test]
    fn build_request_has_system_and_user_messages() {
        let body = OpenAiBackend::build_request(&request(BackendOptions::default()));

        assert_eq!(body.model, "gpt-4o");
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, "system");
        assert_eq!(body.messages[0].content, "Fix grammar");
        assert_eq!(body.messages[1].role, "user");
        assert_eq!(body.messages[1].content, "helo wrold");
        assert_eq!(body.max_tokens, 1024);
        assert!(body.temperature.is_none());
    }

    #[test]
    fn build_request_applies_options() {
        let options: BackendOptions =
            serde_json::from_value(json!({ "temperature": 0.3, "max_tokens": 200, "top_p": 0.9 }))
                .unwrap();
        let body = OpenAiBackend::build_request(&request(options));

        assert_eq!(body.temperature, Some(0.3));
        assert_eq!(body.max_tokens, 200);

        let serialized = serde_json::to_value(&body).unwrap();
        assert_eq!(serialized["top_p"], json!(0.9));
    }

    #[test]
    fn api_url_joins_base() {
        let backend = OpenAiBackend::with_base_url("key", "http://localhost:9999/");
        assert_eq!(backend.api_url(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn extract_text_from_first_choice() {
        let response = ChatCompletionResponse {
            choices: Some(vec![ChatChoice {
                message: ChatChoiceMessage {
                    content: Some("Hello world".to_string()),
                },
            }]),
        };
        assert_eq!(
            OpenAiBackend::extract_text(&response),
            Some("Hello world".to_string())
        );
    }

    #[test]
    fn extract_text_missing_choices() {
        let response = ChatCompletionResponse { choices: None };
        assert!(OpenAiBackend::extract_text(&response).is_none());
    }
}
