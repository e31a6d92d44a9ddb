//! Direct Configuration Validator
//!
//! Validates an externally supplied facets mapping against the schema
//! registry without invoking the model. Keys are classified, never mutated
//! or dropped: the outcome echoes the input facets unchanged. Unlike the
//! AI path, a missing schema here degrades to "no validation performed"
//! with an explicit warning instead of failing the request.

use serde::Serialize;

use crate::facets::Facets;
use crate::schema::FacetSchema;

/// Result of validating a direct facet configuration
///
/// Constructed per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    /// The input facets, echoed unchanged
    pub facets: Facets,
    pub valid_keys: Vec<String>,
    pub invalid_keys: Vec<String>,
    pub errors: Vec<String>,
    /// False when validation was skipped (by request, or because the
    /// schema could not be loaded)
    pub validated: bool,
}

impl ValidationOutcome {
    /// Outcome for a configuration accepted without schema validation
    pub fn unvalidated(facets: Facets) -> Self {
        Self {
            facets,
            valid_keys: Vec::new(),
            invalid_keys: Vec::new(),
            errors: Vec::new(),
            validated: false,
        }
    }

    /// Whether every key passed (vacuously true when unvalidated)
    pub fn is_valid(&self) -> bool {
        self.invalid_keys.is_empty()
    }
}

/// Classify every key of the input against the schema registry
pub fn validate(facets: &Facets, schema: &FacetSchema) -> ValidationOutcome {
    let mut valid_keys = Vec::new();
    let mut invalid_keys = Vec::new();
    let mut errors = Vec::new();

    for key in facets.keys() {
        if schema.is_valid_key(key) {
            valid_keys.push(key.to_string());
        } else {
            invalid_keys.push(key.to_string());
            errors.push(format!("Unknown facet key: '{}'", key));
        }
    }

    tracing::info!(
        valid = valid_keys.len(),
        invalid = invalid_keys.len(),
        "Validated direct facet configuration"
    );

    ValidationOutcome {
        facets: facets.clone(),
        valid_keys,
        invalid_keys,
        errors,
        validated: true,
    }
}

/// Validate against the process-wide schema registry
///
/// If the schema cannot be loaded, validation degrades to a warning entry
/// rather than failing the whole request.
pub fn validate_direct(facets: &Facets) -> ValidationOutcome {
    match crate::schema::facet_schema() {
        Ok(schema) => validate(facets, schema),
        Err(e) => {
            tracing::warn!("Could not load facets schema for validation: {}", e);
            let mut outcome = ValidationOutcome::unvalidated(facets.clone());
            outcome
                .errors
                .push(format!("Facets schema not available, validation skipped: {}", e));
            outcome
        }
    }
}
