//! Error taxonomy for the facet extraction pipeline
//!
//! Three failure families, one per pipeline boundary: schema loading,
//! completion backend calls, and response interpretation. `ExtractError`
//! is the umbrella the orchestration layer returns.

use thiserror::Error;

/// Errors raised while loading the facet schema document
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("failed to read facets config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse facets config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("facet definition at index {index} has no key")]
    MissingKey { index: usize },

    #[error("duplicate facet key '{key}' in facets config")]
    DuplicateKey { key: String },
}

/// Errors raised by the completion backend
///
/// Never retried internally; the caller owns retry and timeout policy.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("completion API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("empty response from completion backend")]
    EmptyResponse,

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Model output unusable after every repair strategy was exhausted
///
/// Carries the raw text so the caller can log and inspect the
/// malformed output.
#[derive(Debug, Error)]
#[error("failed to interpret model response: {reason}\n\nraw response was:\n{raw}")]
pub struct InterpretationError {
    pub reason: String,
    pub raw: String,
}

/// Umbrella error for the end-to-end extraction pipeline
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Schema(#[from] SchemaLoadError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Interpretation(#[from] InterpretationError),
}

/// Result alias for pipeline operations
pub type ExtractResult<T> = Result<T, ExtractError>;
