//! Completion Client Trait
//!
//! Unified interface over generative text backends. The pipeline only
//! needs "send prompt, receive text"; everything provider-specific lives
//! behind this trait so tests can swap in a deterministic stub and never
//! touch a live model.

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::prompt::PromptPayload;

/// Black-box text-completion capability
///
/// The single suspension point of the pipeline: this is the only component
/// that crosses a network boundary. Failures are surfaced to the caller
/// and never retried internally.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the prompt, return the raw text response
    async fn complete(&self, payload: &PromptPayload) -> Result<String, CompletionError>;

    /// Model name for logging
    fn model_name(&self) -> &str;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}
