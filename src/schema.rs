//! Facet Schema Registry
//!
//! The immutable catalog of every recognized facet key, its semantic type,
//! and representative values. Loaded once from `config/facets_config.json`
//! (overridable via `FACETS_CONFIG_PATH`) and shared process-wide through a
//! `OnceLock`; nothing mutates it after load, so concurrent reads are safe.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::SchemaLoadError;

/// Default location of the facets config document, relative to the
/// process working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/facets_config.json";

/// Semantic type of a facet value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetType {
    /// Free-form string (the default when the config omits a type)
    #[default]
    String,
    /// String drawn from a known value set
    Enum,
    /// List of strings
    StringList,
    /// Boolean flag
    Bool,
    /// Whole number
    Integer,
    /// Decimal number
    Float,
    /// Nested `{min, max}` object with numeric bounds
    PriceRange,
}

/// One recognized facet key and its metadata
#[derive(Debug, Clone, Serialize)]
pub struct FacetDefinition {
    pub key: String,
    #[serde(rename = "type")]
    pub facet_type: FacetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

/// Raw definition as it appears in the config document; `key` is optional
/// here so a missing key surfaces as a schema error rather than a generic
/// parse failure
#[derive(Debug, Deserialize)]
struct RawDefinition {
    key: Option<String>,
    #[serde(rename = "type", default)]
    facet_type: FacetType,
    description: Option<String>,
    #[serde(default)]
    allowed_values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SchemaDoc {
    facets: Vec<RawDefinition>,
}

/// Ordered, immutable collection of facet definitions
#[derive(Debug, Serialize)]
pub struct FacetSchema {
    #[serde(rename = "facets")]
    definitions: Vec<FacetDefinition>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FacetSchema {
    /// Load the schema from a JSON document on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json_str(&content, &display)
    }

    /// Parse the schema from JSON text; `origin` names the source in errors
    pub fn from_json_str(content: &str, origin: &str) -> Result<Self, SchemaLoadError> {
        let doc: SchemaDoc =
            serde_json::from_str(content).map_err(|source| SchemaLoadError::Parse {
                path: origin.to_string(),
                source,
            })?;

        let mut definitions = Vec::with_capacity(doc.facets.len());
        for (index, raw) in doc.facets.into_iter().enumerate() {
            let key = raw.key.ok_or(SchemaLoadError::MissingKey { index })?;
            definitions.push(FacetDefinition {
                key,
                facet_type: raw.facet_type,
                description: raw.description,
                allowed_values: raw.allowed_values,
            });
        }
        Self::from_definitions(definitions)
    }

    /// Build a schema from already-constructed definitions, enforcing key
    /// uniqueness
    pub fn from_definitions(definitions: Vec<FacetDefinition>) -> Result<Self, SchemaLoadError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if index.insert(def.key.clone(), i).is_some() {
                return Err(SchemaLoadError::DuplicateKey {
                    key: def.key.clone(),
                });
            }
        }
        Ok(Self { definitions, index })
    }

    /// All recognized facet keys, in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.key.as_str())
    }

    /// Whether `key` is a recognized facet
    pub fn is_valid_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Definition for `key`, if recognized
    pub fn definition(&self, key: &str) -> Option<&FacetDefinition> {
        self.index.get(key).map(|&i| &self.definitions[i])
    }

    /// All definitions, in document order
    pub fn definitions(&self) -> &[FacetDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Resolve the config path from `FACETS_CONFIG_PATH` or the default
pub fn config_path() -> String {
    std::env::var("FACETS_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Global schema instance, loaded on first access
static SCHEMA: OnceLock<FacetSchema> = OnceLock::new();

/// Get the process-wide facet schema, loading it on first call
///
/// Unlike lazy registries that degrade to an empty default, a load failure
/// here is surfaced to the caller: the extraction pipeline cannot run
/// without the schema.
pub fn facet_schema() -> Result<&'static FacetSchema, SchemaLoadError> {
    if let Some(schema) = SCHEMA.get() {
        return Ok(schema);
    }
    let loaded = FacetSchema::load(config_path())?;
    tracing::info!(facets = loaded.len(), "Loaded facet schema");
    Ok(SCHEMA.get_or_init(|| loaded))
}

/// Hand-authored category → facet-key taxonomy for schema introspection
///
/// This is a static catalog view of the schema, independent of the
/// classifier's runtime indicator sets (which are deliberately narrower).
pub fn category_taxonomy() -> BTreeMap<&'static str, Vec<&'static str>> {
    BTreeMap::from([
        (
            "core",
            vec!["brand", "model", "cat_id", "price", "price_ranges", "backbox_grade"],
        ),
        (
            "mobile_electronics",
            vec![
                "storage",
                "color",
                "screen_size",
                "memory",
                "processor",
                "network",
                "connectivity",
                "camera",
                "dual_sim",
                "battery_capacity",
                "os",
            ],
        ),
        (
            "computing",
            vec![
                "graphic_card",
                "processor_type",
                "storage_type",
                "touchscreen",
                "webcam",
                "screen_format",
                "screen_type",
            ],
        ),
        (
            "home_appliances",
            vec![
                "energy_class",
                "capacity",
                "power",
                "coffee_machine_type",
                "washing_machine_type",
                "fridge_type",
            ],
        ),
        (
            "gaming",
            vec![
                "console_type",
                "compatible_gaming_console",
                "pegi",
                "video_game_genre",
                "controllers_number",
            ],
        ),
        (
            "general",
            vec![
                "warranty",
                "deals_type",
                "special_offer_type",
                "year_date_release",
                "generation",
                "vintage",
                "limited_edition",
            ],
        ),
        (
            "technical",
            vec![
                "merchant_id",
                "deduplication_id",
                "is_cheapest_listing",
                "publication_state",
                "backbox",
            ],
        ),
    ])
}
