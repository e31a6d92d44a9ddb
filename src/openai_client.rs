//! OpenAI Client
//!
//! Completion client implementation for the OpenAI chat completions API.
//! Requests json_object response mode and the configured zero temperature
//! so repeated calls with identical input stay as reproducible as the
//! backend allows.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::completion_client::CompletionClient;
use crate::config::ExtractorConfig;
use crate::error::CompletionError;
use crate::prompt::PromptPayload;

/// OpenAI API client
#[derive(Clone)]
pub struct OpenAiClient {
    config: ExtractorConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client from a configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, CompletionError> {
        if config.api_key.is_empty() {
            return Err(CompletionError::Authentication(
                "OpenAI API key is empty".into(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { config, client })
    }

    /// Create from `OPENAI_API_KEY` / `OPENAI_MODEL`
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::new(ExtractorConfig::openai_from_env()?)
    }

    async fn call_api(&self, payload: &PromptPayload) -> Result<String, CompletionError> {
        let mut body = serde_json::json!({
            "model": &self.config.model,
            "messages": [
                {"role": "system", "content": &payload.system},
                {"role": "user", "content": &payload.user}
            ],
            "temperature": self.config.temperature,
            "response_format": {"type": "json_object"}
        });
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        tracing::debug!(model = %self.config.model, "Sending request to OpenAI");

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "OpenAI API error: {}", body);
            return Err(match status.as_u16() {
                401 | 403 => CompletionError::Authentication(body),
                429 => CompletionError::RateLimited,
                code => CompletionError::Api { status: code, body },
            });
        }

        #[derive(Deserialize)]
        struct Message {
            content: String,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let api_response: ApiResponse = response.json().await?;
        let content = api_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or(CompletionError::EmptyResponse)?;

        if content.trim().is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        Ok(content)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, payload: &PromptPayload) -> Result<String, CompletionError> {
        self.call_api(payload).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}
