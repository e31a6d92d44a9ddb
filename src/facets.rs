//! Facet mapping types
//!
//! `Facets` is the resolved key/value mapping every pipeline stage hands
//! around. Its defining invariant: a facet is either present with a
//! meaningful value or entirely absent. Null, empty-string, empty-array and
//! empty-object values never survive construction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resolved facets mapping, insertion-ordered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facets(Map<String, Value>);

impl Facets {
    /// Empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw map, dropping every key whose value carries no
    /// meaningful content
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .filter(|(_, v)| !is_empty_value(v))
                .collect(),
        )
    }

    /// Insert a facet; meaningless values are dropped instead of stored
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        if !is_empty_value(&value) {
            self.0.insert(key.into(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl FromIterator<(String, Value)> for Facets {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

/// Whether a value carries no meaningful content
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Price range facet value; at least one bound is expected when emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl PriceRange {
    /// Whether either bound is set
    pub fn has_bound(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_map_drops_empty_values() {
        let mut map = Map::new();
        map.insert("brand".into(), json!("Apple"));
        map.insert("model".into(), Value::Null);
        map.insert("color".into(), json!(""));
        map.insert("network".into(), json!([]));
        map.insert("price_ranges".into(), json!({}));
        map.insert("dual_sim".into(), json!(false));

        let facets = Facets::from_map(map);
        assert_eq!(facets.len(), 2);
        assert!(facets.contains_key("brand"));
        // false is meaningful content, not an absent facet
        assert!(facets.contains_key("dual_sim"));
        assert!(!facets.contains_key("model"));
        assert!(!facets.contains_key("color"));
        assert!(!facets.contains_key("network"));
        assert!(!facets.contains_key("price_ranges"));
    }

    #[test]
    fn insert_refuses_null() {
        let mut facets = Facets::new();
        facets.insert("brand", json!("Sony"));
        facets.insert("model", Value::Null);
        assert_eq!(facets.len(), 1);
    }

    #[test]
    fn price_range_deserializes_single_bound() {
        let range: PriceRange = serde_json::from_value(json!({"max": 800.0})).unwrap();
        assert_eq!(range.max, Some(800.0));
        assert_eq!(range.min, None);
        assert!(range.has_bound());
    }

    #[test]
    fn price_range_rejects_unknown_fields() {
        let result: Result<PriceRange, _> = serde_json::from_value(json!({"maximum": 800.0}));
        assert!(result.is_err());
    }
}
