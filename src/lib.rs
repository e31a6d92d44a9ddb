//! LLM-powered facet extraction for product search
//!
//! Converts a free-text product query into a structured set of key-value
//! facets usable for catalog filtering. No transport or database
//! dependencies - callers own HTTP mapping, retries and timeouts.
//!
//! ## Architecture
//!
//! ```text
//! Query → Prompt Builder → Completion Client → Response Interpreter → Facets
//!              ↑ (schema)                            ↑ (schema)          ↓
//!        Facet Schema Registry                             Category Classifier
//! ```
//!
//! The direct-configuration path bypasses the model entirely and only
//! consults the Schema Registry (see [`validator`]).
//!
//! ## Backend Selection
//!
//! Set the `FACET_BACKEND` environment variable:
//! - `openai` (default): OpenAI chat completions API
//! - `anthropic`: Anthropic Claude messages API

// Completion client abstraction
pub mod anthropic_client;
pub mod backend;
pub mod completion_client;
pub mod openai_client;

// Core pipeline modules
pub mod classifier;
pub mod config;
pub mod error;
pub mod extractor;
pub mod facets;
pub mod interpreter;
pub mod prompt;
pub mod schema;
pub mod validator;

// Re-exports for convenience
pub use backend::{create_client, Backend};
pub use classifier::classify;
pub use completion_client::CompletionClient;
pub use config::ExtractorConfig;
pub use error::{
    CompletionError, ExtractError, ExtractResult, InterpretationError, SchemaLoadError,
};
pub use extractor::{BatchItem, FacetExtractor, ParsedQuery};
pub use facets::{Facets, PriceRange};
pub use interpreter::interpret;
pub use prompt::{build_prompt, PromptPayload};
pub use schema::{category_taxonomy, facet_schema, FacetSchema};
pub use validator::{validate, validate_direct, ValidationOutcome};
