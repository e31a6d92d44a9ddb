//! Category Classifier
//!
//! Infers which product-category buckets a resolved facets mapping
//! represents. A category is present iff at least one of its indicator
//! fields is present; a mapping that matches nothing is "general". The
//! field sets are fixed and deliberately narrower than the full schema
//! (e.g. `webcam` is a schema key but not a computing indicator).

use std::collections::BTreeSet;

use crate::facets::Facets;

const MOBILE_ELECTRONICS_FIELDS: &[&str] = &[
    "storage",
    "color",
    "screen_size",
    "network",
    "camera",
    "os",
    "battery_capacity",
];

const COMPUTING_FIELDS: &[&str] = &["graphic_card", "processor_type", "storage_ssd", "touchscreen"];

const HOME_APPLIANCES_FIELDS: &[&str] = &[
    "energy_class",
    "capacity",
    "coffee_machine_type",
    "washing_machine_type",
];

const GAMING_FIELDS: &[&str] = &[
    "console_type",
    "pegi",
    "video_game_genre",
    "controllers_number",
];

/// Classify a facets mapping into category buckets
///
/// Pure function, no failure modes. Multiple categories may be returned
/// at once; an empty or unmatched mapping yields `{"general"}`.
pub fn classify(facets: &Facets) -> BTreeSet<String> {
    let mut categories = BTreeSet::new();

    let groups: [(&str, &[&str]); 4] = [
        ("mobile_electronics", MOBILE_ELECTRONICS_FIELDS),
        ("computing", COMPUTING_FIELDS),
        ("home_appliances", HOME_APPLIANCES_FIELDS),
        ("gaming", GAMING_FIELDS),
    ];

    for (category, fields) in groups {
        if fields.iter().any(|f| facets.contains_key(f)) {
            categories.insert(category.to_string());
        }
    }

    if categories.is_empty() {
        categories.insert("general".to_string());
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facets_of(pairs: &[(&str, serde_json::Value)]) -> Facets {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn graphic_card_is_computing() {
        let facets = facets_of(&[("graphic_card", json!("RTX 3060"))]);
        assert_eq!(names(&classify(&facets)), vec!["computing"]);
    }

    #[test]
    fn empty_mapping_is_general() {
        assert_eq!(names(&classify(&Facets::new())), vec!["general"]);
    }

    #[test]
    fn multiple_categories_at_once() {
        let facets = facets_of(&[
            ("storage", json!("256GB")),
            ("console_type", json!("PS5")),
        ]);
        assert_eq!(
            names(&classify(&facets)),
            vec!["gaming", "mobile_electronics"]
        );
    }

    #[test]
    fn appliance_fields() {
        let facets = facets_of(&[("energy_class", json!("A++"))]);
        assert_eq!(names(&classify(&facets)), vec!["home_appliances"]);
    }

    #[test]
    fn non_indicator_keys_are_general() {
        // brand and webcam are schema keys but not indicator fields
        let facets = facets_of(&[("brand", json!("Apple")), ("webcam", json!(true))]);
        assert_eq!(names(&classify(&facets)), vec!["general"]);
    }
}
