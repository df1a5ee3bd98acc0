//! Example value synthesis.
//!
//! Every function here is pure: the same schema always yields byte-identical
//! output. Sample payloads are deliberately single-level; nested objects and
//! arrays are not expanded and fall into the generic `"value"` placeholder.

use serde_json::{Map, Value};

use crate::spec::{MediaType, Response, Schema, SchemaType};

/// Fallback used when a schema declares no default.
pub const DEFAULT_FALLBACK: &str = "sample";

/// Placeholder for missing values.
pub const PLACEHOLDER: &str = "-";

/// Convert an example or default value to display text.
///
/// Strings are emitted raw, scalars through their JSON form and composite
/// values as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Stringified declared default of a schema, or `fallback`.
pub fn default_value_of(schema: Option<&Schema>, fallback: &str) -> String {
    schema
        .and_then(|s| s.default.as_ref())
        .map(value_to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// Stringified declared default of a schema, or `"sample"`.
pub fn default_value(schema: Option<&Schema>) -> String {
    default_value_of(schema, DEFAULT_FALLBACK)
}

/// Placeholder value chosen by type tag alone.
pub fn sample_value(schema_type: Option<&SchemaType>) -> Value {
    match schema_type {
        Some(SchemaType::String) => Value::from("sample"),
        Some(SchemaType::Integer) => Value::from(1),
        Some(SchemaType::Number) => Value::from(1.0),
        Some(SchemaType::Boolean) => Value::from(true),
        _ => Value::from("value"),
    }
}

/// Single-level sample object for a resolved schema, as compact JSON.
///
/// Keys follow declared property order. A schema without properties yields `{}`.
pub fn sample_json(schema: &Schema) -> String {
    if !schema.has_properties() {
        return "{}".to_string();
    }

    let object: Map<String, Value> = schema
        .properties
        .iter()
        .map(|(name, property)| (name.clone(), sample_value(property.schema_type.as_ref())))
        .collect();

    Value::Object(object).to_string()
}

/// Author-supplied example for a media type: the explicit example, else the
/// first named example's value.
pub fn media_example(media: &MediaType) -> Option<&Value> {
    media.example.as_ref().or_else(|| media.first_named_example())
}

/// Example text for a response, or `"-"`.
///
/// Media types are searched in declaration order and the first one carrying
/// any usable example wins; values are never merged across media types.
pub fn example_from_response(response: &Response) -> String {
    response
        .content
        .values()
        .find_map(media_example)
        .map(value_to_string)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_value_of() {
        let with_default = Schema::of_type(SchemaType::Integer).with_default(json!(42));
        assert_eq!(default_value_of(Some(&with_default), "1"), "42");
        assert_eq!(default_value_of(Some(&Schema::default()), "1"), "1");
        assert_eq!(default_value_of(None, "x"), "x");
        assert_eq!(default_value(None), "sample");

        let text = Schema::of_type(SchemaType::String).with_default(json!("asc"));
        assert_eq!(default_value(Some(&text)), "asc");
    }

    #[test]
    fn test_sample_json_by_type() {
        let schema = Schema::object([
            ("a", Schema::of_type(SchemaType::String)),
            ("b", Schema::of_type(SchemaType::Integer)),
            ("c", Schema::of_type(SchemaType::Boolean)),
        ]);
        assert_eq!(sample_json(&schema), r#"{"a":"sample","b":1,"c":true}"#);
    }

    #[test]
    fn test_sample_json_is_single_level() {
        let schema = Schema::object([
            ("price", Schema::of_type(SchemaType::Number)),
            (
                "owner",
                Schema::object([("name", Schema::of_type(SchemaType::String))]),
            ),
            ("tags", Schema::of_type(SchemaType::Array)),
            ("ref", Schema::reference("Other")),
        ]);
        assert_eq!(
            sample_json(&schema),
            r#"{"price":1.0,"owner":"value","tags":"value","ref":"value"}"#
        );
    }

    #[test]
    fn test_sample_json_empty() {
        assert_eq!(sample_json(&Schema::default()), "{}");
    }

    #[test]
    fn test_example_from_response_priority() {
        let response: Response = serde_json::from_value(json!({
            "content": {
                "text/plain": {},
                "application/json": {
                    "example": {"id": 1},
                    "examples": {"named": {"value": "ignored"}}
                },
                "application/xml": {"example": "<pet/>"}
            }
        }))
        .unwrap();
        assert_eq!(example_from_response(&response), r#"{"id":1}"#);

        let named: Response = serde_json::from_value(json!({
            "content": {"application/json": {"examples": {"first": {"value": "hello"}}}}
        }))
        .unwrap();
        assert_eq!(example_from_response(&named), "hello");

        assert_eq!(example_from_response(&Response::default()), "-");
    }
}
