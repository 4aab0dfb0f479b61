//! Ollama generate backend adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::ports::{BackendClient, BackendError};
use crate::domain::pipeline::TransformRequest;

/// Local models are slow; give them more room than the hosted API
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// Request types for the generate API

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ModelOptions>,
}

#[derive(Debug, Serialize)]
struct ModelOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    /// Ollama's name for the response token ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

// Response types

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    error: Option<String>,
}

/// Ollama generate client against a local server
pub struct OllamaBackend {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OllamaBackend {
    /// Create a client for the given base URL, e.g. "http://localhost:11434"
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
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
        format!("{}/api/generate", self.base_url)
    }

    /// Generate has no system/user split; combine prompt and selection
    fn build_request(request: &TransformRequest) -> GenerateRequest {
        let options = if request.options.is_empty() {
            None
        } else {
            Some(ModelOptions {
                temperature: request.options.temperature,
                num_predict: request.options.max_tokens,
                extra: request.options.extra.clone(),
            })
        };

        GenerateRequest {
            model: request.model.clone(),
            prompt: format!(
                "{}\n\nText to process:\n{}",
                request.prompt, request.text
            ),
            stream: false,
            options,
        }
    }
}

#[async_trait]
impl BackendClient for OllamaBackend {
    async fn complete(&self, request: &TransformRequest) -> Result<String, BackendError> {
        let body = Self::build_request(request);

        let response = self
            .client
            .post(self.api_url())
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
        let response: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::Malformed(e.to_string())
            }
        })?;

        if let Some(error) = response.error {
            return Err(BackendError::Api(error));
        }

        let text = response.response.ok_or(BackendError::EmptyCompletion)?;

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
            backend: BackendKind::Ollama,
            text: "helo wrold".to_string(),
            prompt: "Fix grammar".to_string(),
            model: "llama3".to_string(),
            options,
        }
    }

    #[test]
    fn build_request_combines_prompt_and_text() {
        let body = OllamaBackend::build_request(&request(BackendOptions::default()));

        assert_eq!(body.model, "llama3");
        assert!(!body.stream);
        assert!(body.prompt.starts_with("Fix grammar"));
        assert!(body.prompt.ends_with("helo wrold"));
        assert!(body.options.is_none());
    }

    #[test]
    fn build_request_maps_options() {
        let options: BackendOptions =
            serde_json::from_value(json!({ "temperature": 0.8, "max_tokens": 128, "top_k": 40 }))
                .unwrap();
        let body = OllamaBackend::build_request(&request(options));

        let model_options = body.options.unwrap();
        assert_eq!(model_options.temperature, Some(0.8));
        assert_eq!(model_options.num_predict, Some(128));

        let serialized = serde_json::to_value(&model_options).unwrap();
        assert_eq!(serialized["top_k"], json!(40));
    }

    #[test]
    fn api_url_joins_base() {
        let backend = OllamaBackend::new("http://localhost:11434/");
        assert_eq!(backend.api_url(), "http://localhost:11434/api/generate");
    }
}
