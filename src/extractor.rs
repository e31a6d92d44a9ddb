//! Facet Extractor
//!
//! Orchestrates the single-query pipeline: build prompt → complete →
//! interpret, with optional metadata derivation, plus an independent
//! fan-out for batches. Holds no state beyond the immutable schema and
//! the pluggable completion client.

use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::backend::{create_client, Backend};
use crate::classifier::classify;
use crate::completion_client::CompletionClient;
use crate::error::{ExtractError, ExtractResult};
use crate::facets::Facets;
use crate::interpreter::interpret;
use crate::prompt::build_prompt;
use crate::schema::{facet_schema, FacetSchema};

/// One parsed query with derived metadata
#[derive(Debug, Clone, Serialize)]
pub struct ParsedQuery {
    pub query: String,
    pub facets: Facets,
    /// Always `facets.len()`
    pub facet_count: usize,
    /// Derived by the classifier, never supplied by the model
    pub categories_detected: BTreeSet<String>,
}

/// Per-item result of a batch extraction
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub query: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Facets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories_detected: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItem {
    fn succeeded(query: &str, facets: Facets, metadata: bool) -> Self {
        let (facet_count, categories_detected) = if metadata {
            (Some(facets.len()), Some(classify(&facets)))
        } else {
            (None, None)
        };
        Self {
            query: query.to_string(),
            success: true,
            facets: Some(facets),
            facet_count,
            categories_detected,
            error: None,
        }
    }

    fn failed(query: &str, error: &ExtractError) -> Self {
        Self {
            query: query.to_string(),
            success: false,
            facets: None,
            facet_count: None,
            categories_detected: None,
            error: Some(error.to_string()),
        }
    }
}

/// Query-to-facets extraction service
pub struct FacetExtractor<'a> {
    client: Arc<dyn CompletionClient>,
    schema: &'a FacetSchema,
}

impl<'a> FacetExtractor<'a> {
    /// Create an extractor over an already-built client and schema
    pub fn new(client: Arc<dyn CompletionClient>, schema: &'a FacetSchema) -> Self {
        Self { client, schema }
    }

    /// The schema this extractor targets
    pub fn schema(&self) -> &FacetSchema {
        self.schema
    }
}

impl FacetExtractor<'static> {
    /// Build from the environment: process-wide schema, backend from
    /// `FACET_BACKEND`
    pub fn from_env() -> ExtractResult<Self> {
        let schema = facet_schema()?;
        let backend = Backend::from_env()?;
        let client = create_client(backend)?;
        Ok(Self::new(client, schema))
    }
}

impl FacetExtractor<'_> {
    /// Parse a natural language query into structured facets
    pub async fn extract_facets(&self, query: &str) -> ExtractResult<Facets> {
        tracing::info!(%query, "Parsing query");

        let payload = build_prompt(query, self.schema);
        let raw = self.client.complete(&payload).await?;
        let facets = interpret(&raw, self.schema)?;

        tracing::debug!(facets = facets.len(), "Extracted facets");
        Ok(facets)
    }

    /// Parse a query and derive metadata (count, detected categories)
    ///
    /// Classification itself never fails; failures here come from the
    /// completion or interpretation stages only.
    pub async fn extract_facets_with_metadata(&self, query: &str) -> ExtractResult<ParsedQuery> {
        let facets = self.extract_facets(query).await?;
        let categories_detected = classify(&facets);
        Ok(ParsedQuery {
            query: query.to_string(),
            facet_count: facets.len(),
            facets,
            categories_detected,
        })
    }

    /// Process many queries as an independent fan-out
    ///
    /// One query's failure never aborts its siblings; every input yields
    /// exactly one `BatchItem`.
    pub async fn extract_batch(&self, queries: &[String], with_metadata: bool) -> Vec<BatchItem> {
        let futures = queries.iter().map(|query| async move {
            match self.extract_facets(query).await {
                Ok(facets) => BatchItem::succeeded(query, facets, with_metadata),
                Err(e) => {
                    tracing::error!(%query, "Error parsing query: {}", e);
                    BatchItem::failed(query, &e)
                }
            }
        });
        join_all(futures).await
    }
}
