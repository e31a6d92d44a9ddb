//! Prompt Builder
//!
//! Assembles the two-part model input: a system instruction embedding the
//! full facet schema, a machine-readable description of the expected output
//! shape, and the extraction policy rules; plus the raw user query. Pure
//! assembly with no failure modes and no randomness.

use crate::schema::{FacetSchema, FacetType};

/// Deterministic two-part model input
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPayload {
    pub system: String,
    pub user: String,
}

/// Build the prompt for one query against the loaded schema
pub fn build_prompt(query: &str, schema: &FacetSchema) -> PromptPayload {
    let schema_json = serde_json::to_string_pretty(schema).unwrap_or_default();

    let system = format!(
        r#"You are an expert product search assistant. Your task is to analyze user queries and extract relevant product facets/filters from their natural language request.

You must understand the user's intent and map it to the appropriate product attributes.

Here is the complete facets schema with all available fields:
{schema_json}

Important guidelines:
- Extract ONLY the facets that are explicitly mentioned or clearly implied in the user query
- Do not invent or assume values that are not present in the query
- For price ranges, if user mentions "under X" set max to X, if "over X" set min to X
- For conditions like "new", "refurbished", "like new" use the backbox_grade field
- For colors, storage, sizes, etc., use the exact values mentioned
- For boolean fields, only set them if explicitly mentioned
- Map product categories to appropriate cat_id values
- Be intelligent about synonyms (e.g., "smartphone" = "smartphones", "laptop" = "laptops")

{format_instructions}

Respond ONLY with valid JSON matching the schema. Do not include any explanation."#,
        schema_json = schema_json,
        format_instructions = format_instructions(schema),
    );

    PromptPayload {
        system,
        user: query.to_string(),
    }
}

/// Render the per-key output contract the model must follow
fn format_instructions(schema: &FacetSchema) -> String {
    let mut out = String::from(
        "Output format: a single JSON object. Every key must be one of the facet keys below, \
         with a value of the stated type. Omit any facet not present in the query; never emit \
         null or empty values.\n\n",
    );

    for def in schema.definitions() {
        out.push_str(&format!(
            "- \"{}\": {}",
            def.key,
            type_description(def.facet_type)
        ));
        if !def.allowed_values.is_empty() {
            out.push_str(&format!(" (e.g. {})", def.allowed_values.join(", ")));
        }
        if let Some(desc) = &def.description {
            out.push_str(&format!(" — {}", desc));
        }
        out.push('\n');
    }

    out
}

fn type_description(facet_type: FacetType) -> &'static str {
    match facet_type {
        FacetType::String | FacetType::Enum => "string",
        FacetType::StringList => "list of strings",
        FacetType::Bool => "boolean",
        FacetType::Integer => "integer",
        FacetType::Float => "number",
        FacetType::PriceRange => r#"object {"min": number, "max": number}, at least one bound"#,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FacetSchema;

    fn test_schema() -> FacetSchema {
        FacetSchema::from_json_str(
            r#"{"facets": [
                {"key": "brand", "type": "string", "description": "Product brand"},
                {"key": "network", "type": "string_list", "allowed_values": ["4G", "5G"]},
                {"key": "dual_sim", "type": "bool"},
                {"key": "controllers_number", "type": "integer"},
                {"key": "price_ranges", "type": "price_range"}
            ]}"#,
            "test",
        )
        .unwrap()
    }

    #[test]
    fn embeds_schema_and_policy_rules() {
        let schema = test_schema();
        let payload = build_prompt("iPhone 13 under $800", &schema);

        assert!(payload.system.contains("\"brand\""));
        assert!(payload
            .system
            .contains(r#"if user mentions "under X" set max to X"#));
        assert!(payload.system.contains("backbox_grade"));
        assert!(payload.system.contains("only set them if explicitly mentioned"));
        assert_eq!(payload.user, "iPhone 13 under $800");
    }

    #[test]
    fn format_instructions_state_types() {
        let schema = test_schema();
        let instructions = format_instructions(&schema);
        assert!(instructions.contains("\"network\": list of strings (e.g. 4G, 5G)"));
        assert!(instructions.contains("\"dual_sim\": boolean"));
        assert!(instructions.contains("\"controllers_number\": integer"));
        assert!(instructions.contains("\"price_ranges\": object"));
    }

    #[test]
    fn build_is_deterministic() {
        let schema = test_schema();
        let a = build_prompt("gaming laptop", &schema);
        let b = build_prompt("gaming laptop", &schema);
        assert_eq!(a, b);
    }
}
