//! Backend Selection
//!
//! Enum for selecting between completion providers plus a factory for
//! building the configured client.

use std::str::FromStr;
use std::sync::Arc;

use crate::anthropic_client::AnthropicClient;
use crate::completion_client::CompletionClient;
use crate::error::CompletionError;
use crate::openai_client::OpenAiClient;

/// Completion backend provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// OpenAI (default, matches the original service)
    #[default]
    OpenAi,
    /// Anthropic Claude
    Anthropic,
}

impl Backend {
    /// Create from the `FACET_BACKEND` environment variable
    ///
    /// Valid values: "openai", "gpt", "anthropic", "claude".
    /// Defaults to OpenAI if not set.
    pub fn from_env() -> Result<Self, CompletionError> {
        let value = std::env::var("FACET_BACKEND").unwrap_or_else(|_| "openai".to_string());
        value.parse()
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Backend::OpenAi => "OpenAI",
            Backend::Anthropic => "Anthropic",
        }
    }
}

impl FromStr for Backend {
    type Err = CompletionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Backend::OpenAi),
            "anthropic" | "claude" => Ok(Backend::Anthropic),
            other => Err(CompletionError::Configuration(format!(
                "Unknown FACET_BACKEND '{}'. Valid values: openai, gpt, anthropic, claude",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build the completion client for a backend, configured from the
/// environment
pub fn create_client(backend: Backend) -> Result<Arc<dyn CompletionClient>, CompletionError> {
    let client: Arc<dyn CompletionClient> = match backend {
        Backend::OpenAi => Arc::new(OpenAiClient::from_env()?),
        Backend::Anthropic => Arc::new(AnthropicClient::from_env()?),
    };
    tracing::info!(
        provider = client.provider_name(),
        model = client.model_name(),
        "Created completion client"
    );
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("openai".parse::<Backend>().unwrap(), Backend::OpenAi);
        assert_eq!("gpt".parse::<Backend>().unwrap(), Backend::OpenAi);
        assert_eq!("OPENAI".parse::<Backend>().unwrap(), Backend::OpenAi);
        assert_eq!("anthropic".parse::<Backend>().unwrap(), Backend::Anthropic);
        assert_eq!("claude".parse::<Backend>().unwrap(), Backend::Anthropic);
        assert!("invalid".parse::<Backend>().is_err());
    }

    #[test]
    fn test_default() {
        assert_eq!(Backend::default(), Backend::OpenAi);
    }
}
