//! Response Interpreter
//!
//! Turns raw model text into a validated facets mapping through an ordered
//! chain of parse strategies. Models occasionally wrap valid JSON in prose
//! or markdown fences despite explicit instructions not to; each strategy
//! strips one wrapper convention while the content itself must always
//! satisfy the strict per-key typed shape. First success wins; when every
//! strategy is exhausted the error carries the raw text for diagnostics.

use serde_json::{Map, Value};

use crate::error::InterpretationError;
use crate::facets::{Facets, PriceRange};
use crate::schema::{FacetSchema, FacetType};

/// One parse attempt in the repair chain
trait ParseStrategy {
    fn name(&self) -> &'static str;

    /// Try to produce a typed facets map from the text
    fn try_parse(&self, text: &str, schema: &FacetSchema) -> Result<Map<String, Value>, String>;
}

/// Layer 1: the text must itself be a JSON object of correctly typed facets
struct StrictJson;

impl ParseStrategy for StrictJson {
    fn name(&self) -> &'static str {
        "strict_json"
    }

    fn try_parse(&self, text: &str, schema: &FacetSchema) -> Result<Map<String, Value>, String> {
        let value: Value =
            serde_json::from_str(text.trim()).map_err(|e| format!("not valid JSON: {}", e))?;
        let Value::Object(map) = value else {
            return Err("top-level value is not a JSON object".to_string());
        };

        let mut checked = Map::with_capacity(map.len());
        for (key, value) in map {
            // Null placeholders are tolerated here; normalization drops them.
            // Keys the schema does not know are tolerated too - registry
            // validation belongs to the direct-configuration path.
            if !value.is_null() {
                if let Some(def) = schema.definition(&key) {
                    check_type(&key, def.facet_type, &value)?;
                    if def.facet_type == FacetType::PriceRange {
                        checked.insert(key, normalize_price_range(&value)?);
                        continue;
                    }
                }
            }
            checked.insert(key, value);
        }
        Ok(checked)
    }
}

/// Layer 2: find a fenced code block and strict-parse its contents only;
/// a json-labeled fence is preferred over a generic one
struct FencedBlock;

impl ParseStrategy for FencedBlock {
    fn name(&self) -> &'static str {
        "fenced_block"
    }

    fn try_parse(&self, text: &str, schema: &FacetSchema) -> Result<Map<String, Value>, String> {
        let inner = if text.contains("```json") {
            text.split("```json")
                .nth(1)
                .and_then(|s| s.split("```").next())
        } else if text.contains("```") {
            text.split("```").nth(1).and_then(|s| s.split("```").next())
        } else {
            return Err("no fenced code block found".to_string());
        };

        let inner = inner.ok_or_else(|| "unterminated fenced code block".to_string())?;
        StrictJson.try_parse(inner.trim(), schema)
    }
}

/// Check a non-null value against its declared semantic type
fn check_type(key: &str, facet_type: FacetType, value: &Value) -> Result<(), String> {
    let ok = match facet_type {
        FacetType::String | FacetType::Enum => value.is_string(),
        FacetType::StringList => value
            .as_array()
            .is_some_and(|a| a.iter().all(|v| v.is_string())),
        FacetType::Bool => value.is_boolean(),
        FacetType::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
        FacetType::Float => value.is_number(),
        FacetType::PriceRange => value.is_object(),
    };
    if ok {
        Ok(())
    } else {
        Err(format!(
            "facet '{}' does not match its declared type {:?}: {}",
            key, facet_type, value
        ))
    }
}

/// Re-serialize a price range so null bounds disappear; `{"max": 800,
/// "min": null}` becomes `{"max": 800}` and an unbounded range becomes an
/// empty object that normalization then drops
fn normalize_price_range(value: &Value) -> Result<Value, String> {
    let range: PriceRange = serde_json::from_value(value.clone())
        .map_err(|e| format!("facet 'price_ranges' is not a valid price range: {}", e))?;
    serde_json::to_value(range).map_err(|e| e.to_string())
}

/// Interpret raw model output into a facets mapping
///
/// Pure function of its input: identical text yields identical facets.
pub fn interpret(raw: &str, schema: &FacetSchema) -> Result<Facets, InterpretationError> {
    let strategies: [&dyn ParseStrategy; 2] = [&StrictJson, &FencedBlock];

    let mut reasons = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        match strategy.try_parse(raw, schema) {
            Ok(map) => {
                tracing::debug!(strategy = strategy.name(), facets = map.len(), "Parsed model response");
                return Ok(Facets::from_map(map));
            }
            Err(reason) => {
                tracing::debug!(strategy = strategy.name(), %reason, "Parse attempt failed");
                reasons.push(format!("{}: {}", strategy.name(), reason));
            }
        }
    }

    Err(InterpretationError {
        reason: reasons.join("; "),
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_schema() -> FacetSchema {
        FacetSchema::from_json_str(
            r#"{"facets": [
                {"key": "brand", "type": "string"},
                {"key": "storage", "type": "string"},
                {"key": "network", "type": "string_list"},
                {"key": "dual_sim", "type": "bool"},
                {"key": "controllers_number", "type": "integer"},
                {"key": "price", "type": "float"},
                {"key": "price_ranges", "type": "price_range"}
            ]}"#,
            "test",
        )
        .unwrap()
    }

    #[test]
    fn strict_parse_of_clean_json() {
        let schema = test_schema();
        let facets = interpret(r#"{"brand": "Apple", "dual_sim": true}"#, &schema).unwrap();
        assert_eq!(facets.get("brand"), Some(&json!("Apple")));
        assert_eq!(facets.get("dual_sim"), Some(&json!(true)));
    }

    #[test]
    fn fenced_json_block_is_repaired() {
        let schema = test_schema();
        let raw = "Here you go:\n```json\n{\"brand\": \"Apple\"}\n```";
        let facets = interpret(raw, &schema).unwrap();
        assert_eq!(facets.len(), 1);
        assert_eq!(facets.get("brand"), Some(&json!("Apple")));
    }

    #[test]
    fn generic_fence_is_repaired() {
        let schema = test_schema();
        let raw = "Sure:\n```\n{\"storage\": \"256GB\"}\n```\nHope that helps.";
        let facets = interpret(raw, &schema).unwrap();
        assert_eq!(facets.get("storage"), Some(&json!("256GB")));
    }

    #[test]
    fn prose_only_response_exhausts_all_layers() {
        let schema = test_schema();
        let err = interpret("I cannot help with that.", &schema).unwrap_err();
        assert_eq!(err.raw, "I cannot help with that.");
        assert!(err.reason.contains("strict_json"));
        assert!(err.reason.contains("fenced_block"));
    }

    #[test]
    fn type_violation_fails_even_inside_fence() {
        let schema = test_schema();
        let raw = "```json\n{\"controllers_number\": \"two\"}\n```";
        let err = interpret(raw, &schema).unwrap_err();
        assert!(err.reason.contains("controllers_number"));
    }

    #[test]
    fn null_and_empty_values_are_dropped() {
        let schema = test_schema();
        let raw = r#"{"brand": "Apple", "storage": null, "network": [], "price_ranges": {}}"#;
        let facets = interpret(raw, &schema).unwrap();
        assert_eq!(facets.len(), 1);
        assert!(!facets.contains_key("storage"));
        assert!(!facets.contains_key("network"));
        assert!(!facets.contains_key("price_ranges"));
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let schema = test_schema();
        let facets = interpret(r#"{"brand": "Apple", "made_up": "value"}"#, &schema).unwrap();
        assert!(facets.contains_key("made_up"));
    }

    #[test]
    fn price_range_null_bound_is_stripped() {
        let schema = test_schema();
        let raw = r#"{"price_ranges": {"max": 800, "min": null}}"#;
        let facets = interpret(raw, &schema).unwrap();
        assert_eq!(facets.get("price_ranges"), Some(&json!({"max": 800.0})));
    }

    #[test]
    fn under_800_maps_to_max_only() {
        let schema = test_schema();
        // The shape a compliant model emits for "under $800"
        let facets = interpret(r#"{"price_ranges": {"max": 800}}"#, &schema).unwrap();
        let range = facets.get("price_ranges").unwrap();
        assert_eq!(range.get("max"), Some(&json!(800.0)));
        assert!(range.get("min").is_none());
    }

    #[test]
    fn interpretation_is_idempotent() {
        let schema = test_schema();
        let raw = "```json\n{\"brand\": \"Sony\", \"controllers_number\": 2}\n```";
        let first = interpret(raw, &schema).unwrap();
        let second = interpret(raw, &schema).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn string_list_rejects_mixed_array() {
        let schema = test_schema();
        let err = interpret(r#"{"network": ["5G", 4]}"#, &schema).unwrap_err();
        assert!(err.reason.contains("network"));
    }
}
