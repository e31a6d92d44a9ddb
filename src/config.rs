//! Completion backend configuration
//!
//! Mirrors the environment-driven setup of the original service: a `.env`
//! file (via dotenvy) or process environment supplies the API key and model,
//! everything else has pipeline defaults. Temperature defaults to 0.0 so
//! repeated calls with identical input are as reproducible as the backend
//! allows.

use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// Default OpenAI model for facet extraction
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-nano";

/// Default Anthropic model for facet extraction
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

/// Configuration for a completion client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// API key for the completion backend
    pub api_key: String,

    /// Model name/version to use
    pub model: String,

    /// Maximum tokens in response
    pub max_tokens: Option<u32>,

    /// Decoding temperature; 0.0 for the facet pipeline
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl ExtractorConfig {
    /// Create a new configuration with pipeline defaults
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: Some(2048),
            temperature: 0.0,
            timeout_seconds: 30,
        }
    }

    /// Build from `OPENAI_API_KEY` / `OPENAI_MODEL`
    pub fn openai_from_env() -> Result<Self, CompletionError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            CompletionError::Authentication("OPENAI_API_KEY environment variable not set".into())
        })?;
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Build from `ANTHROPIC_API_KEY` / `ANTHROPIC_MODEL`
    pub fn anthropic_from_env() -> Result<Self, CompletionError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            CompletionError::Authentication("ANTHROPIC_API_KEY environment variable not set".into())
        })?;
        let model = std::env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| DEFAULT_ANTHROPIC_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}
