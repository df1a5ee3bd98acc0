//! Schema objects.

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use super::reference::component_name;

/// Structural description of a value.
///
/// Properties keep their declared order so that synthesized payloads are
/// reproducible. A schema may point at a component through `reference`;
/// such pointers are only followed by [`crate::resolve::SchemaResolver`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Raw `$ref` pointer, if any
    #[serde(rename = "$ref")]
    pub reference: Option<String>,

    /// Declared type tag
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Human readable description
    pub description: Option<String>,

    /// Object properties in declaration order
    #[serde(default)]
    pub properties: IndexMap<String, Schema>,

    /// Names of required properties
    #[serde(default)]
    pub required: IndexSet<String>,

    /// `allOf` composition branches
    #[serde(default)]
    pub all_of: Vec<Schema>,

    /// Declared default value
    pub default: Option<Value>,

    /// Declared example value
    pub example: Option<Value>,
}

impl Schema {
    /// Create a schema with only a type tag.
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// Create a stub pointing at `#/components/schemas/{name}`.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("#/components/schemas/{}", name)),
            ..Default::default()
        }
    }

    /// Create an object schema from `(name, schema)` pairs.
    pub fn object<S: Into<String>>(properties: impl IntoIterator<Item = (S, Schema)>) -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
            ..Default::default()
        }
    }

    /// Mark properties as required and return self.
    pub fn with_required<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the description and return self.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value and return self.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the example value and return self.
    pub fn with_example(mut self, value: Value) -> Self {
        self.example = Some(value);
        self
    }

    /// Name of the referenced component schema, if this is a local schema reference.
    pub fn reference_name(&self) -> Option<String> {
        self.reference
            .as_deref()
            .and_then(|r| component_name(r, "schemas"))
    }

    /// Check if the schema declares any properties.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Check if a property is in the required set.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Type tag as text, if declared.
    pub fn type_name(&self) -> Option<&str> {
        self.schema_type.as_ref().map(SchemaType::as_str)
    }
}

/// The declared type of a schema.
///
/// OpenAPI 3.1 type arrays such as `["string", "null"]` collapse to their
/// first non-null member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawType")]
pub enum SchemaType {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `object`
    Object,
    /// `array`
    Array,
    /// `null`
    Null,
    /// Any other tag
    Other(String),
}

impl SchemaType {
    /// Get the type tag as it appears in the specification.
    pub fn as_str(&self) -> &str {
        match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::Null => "null",
            SchemaType::Other(s) => s,
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => SchemaType::String,
            "integer" => SchemaType::Integer,
            "number" => SchemaType::Number,
            "boolean" => SchemaType::Boolean,
            "object" => SchemaType::Object,
            "array" => SchemaType::Array,
            "null" => SchemaType::Null,
            other => SchemaType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawType {
    Single(String),
    Many(Vec<String>),
}

impl From<RawType> for SchemaType {
    fn from(raw: RawType) -> Self {
        match raw {
            RawType::Single(tag) => SchemaType::from_tag(&tag),
            RawType::Many(tags) => tags
                .iter()
                .find(|t| t.as_str() != "null")
                .or_else(|| tags.first())
                .map(|t| SchemaType::from_tag(t))
                .unwrap_or(SchemaType::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_deserialize_keeps_property_order() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "required": ["zeta"],
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "integer"},
                "mid": {"type": "boolean"}
            }
        }))
        .unwrap();

        let names: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(schema.is_required("zeta"));
        assert!(!schema.is_required("alpha"));
    }

    #[test]
    fn test_type_array_collapses() {
        let schema: Schema = serde_json::from_value(json!({"type": ["null", "integer"]})).unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Integer));
    }

    #[test]
    fn test_unknown_type_tag() {
        let schema: Schema = serde_json::from_value(json!({"type": "file"})).unwrap();
        assert_eq!(schema.type_name(), Some("file"));
    }

    #[test]
    fn test_reference_name() {
        let schema: Schema =
            serde_json::from_value(json!({"$ref": "#/components/schemas/Pet"})).unwrap();
        assert_eq!(schema.reference_name(), Some("Pet".to_string()));
        assert_eq!(Schema::reference("Pet"), schema);
    }

    #[test]
    fn test_all_of_deserialize() {
        let schema: Schema = serde_json::from_value(json!({
            "allOf": [{"$ref": "#/components/schemas/Base"}, {"type": "object"}]
        }))
        .unwrap();
        assert_eq!(schema.all_of.len(), 2);
    }
}
