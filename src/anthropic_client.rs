//! Anthropic Client
//!
//! Completion client implementation for the Anthropic messages API.
//! Anthropic has no json_object response mode, so a JSON-only instruction
//! is appended to the system prompt instead.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::completion_client::CompletionClient;
use crate::config::ExtractorConfig;
use crate::error::CompletionError;
use crate::prompt::PromptPayload;

/// Anthropic Claude API client
#[derive(Clone)]
pub struct AnthropicClient {
    config: ExtractorConfig,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Create a new client from a configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, CompletionError> {
        if config.api_key.is_empty() {
            return Err(CompletionError::Authentication(
                "Anthropic API key is empty".into(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { config, client })
    }

    /// Create from `ANTHROPIC_API_KEY` / `ANTHROPIC_MODEL`
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::new(ExtractorConfig::anthropic_from_env()?)
    }

    async fn call_api(&self, payload: &PromptPayload) -> Result<String, CompletionError> {
        let system = format!(
            "{}\n\nIMPORTANT: Respond with valid JSON only. No markdown code blocks, no explanations.",
            payload.system
        );

        tracing::debug!(model = %self.config.model, "Sending request to Anthropic");

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": &self.config.model,
                "max_tokens": self.config.max_tokens.unwrap_or(2048),
                "temperature": self.config.temperature,
                "system": system,
                "messages": [{"role": "user", "content": &payload.user}]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, "Anthropic API error: {}", body);
            return Err(match status.as_u16() {
                401 | 403 => CompletionError::Authentication(body),
                429 => CompletionError::RateLimited,
                code => CompletionError::Api { status: code, body },
            });
        }

        #[derive(Deserialize)]
        struct ContentBlock {
            text: Option<String>,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            content: Vec<ContentBlock>,
        }

        let api_response: ApiResponse = response.json().await?;
        let text = api_response
            .content
            .first()
            .and_then(|c| c.text.clone())
            .ok_or(CompletionError::EmptyResponse)?;

        if text.trim().is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, payload: &PromptPayload) -> Result<String, CompletionError> {
        self.call_api(payload).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client() {
        let client =
            AnthropicClient::new(ExtractorConfig::new("test-key", "claude-sonnet-4-20250514"))
                .unwrap();
        assert_eq!(client.model_name(), "claude-sonnet-4-20250514");
        assert_eq!(client.provider_name(), "Anthropic");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = AnthropicClient::new(ExtractorConfig::new("", "claude-3-opus"));
        assert!(matches!(
            result.err(),
            Some(CompletionError::Authentication(_))
        ));
    }
}
