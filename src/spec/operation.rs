//! Operation-level types.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use super::{ReferenceOr, Schema};

/// HTTP method an operation is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// Parse a path-item key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "patch" => Some(HttpMethod::Patch),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    /// Upper-cased method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single API operation (one method on one path).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Short summary
    pub summary: Option<String>,

    /// Long description
    pub description: Option<String>,

    /// Operation identifier
    pub operation_id: Option<String>,

    /// Declared parameters
    #[serde(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,

    /// Request body, if any
    pub request_body: Option<ReferenceOr<RequestBody>>,

    /// Responses keyed by status code
    #[serde(default)]
    pub responses: IndexMap<String, ReferenceOr<Response>>,

    /// Security requirements
    pub security: Option<Vec<IndexMap<String, Vec<String>>>>,
}

impl Operation {
    /// Iterate over resolved parameters in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter_map(ReferenceOr::as_item)
    }

    /// Iterate over resolved parameters at the given location, in declaration order.
    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
        self.parameters().filter(move |p| p.location == location)
    }

    /// Get the resolved request body.
    pub fn request_body(&self) -> Option<&RequestBody> {
        self.request_body.as_ref().and_then(ReferenceOr::as_item)
    }

    /// Iterate over resolved responses as `(status, response)` pairs.
    pub fn responses(&self) -> impl Iterator<Item = (&str, &Response)> {
        self.responses
            .iter()
            .filter_map(|(code, r)| r.as_item().map(|r| (code.as_str(), r)))
    }

    /// Check if the operation declares any security requirement.
    pub fn requires_security(&self) -> bool {
        self.security.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Templated path segment
    Path,
    /// Query string
    Query,
    /// Request header
    Header,
    /// Cookie
    Cookie,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Parameter location
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Whether the parameter is required
    #[serde(default)]
    pub required: bool,

    /// Description
    pub description: Option<String>,

    /// Value schema
    pub schema: Option<Schema>,
}

impl Parameter {
    /// Create a parameter with no description or schema.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: location == ParameterLocation::Path,
            description: None,
            schema: None,
        }
    }

    /// Set the schema and return self.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the required flag and return self.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the description and return self.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A request body, keyed by media type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Description
    pub description: Option<String>,

    /// Content by media type, in declaration order
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    /// Whether the body is required
    #[serde(default)]
    pub required: bool,
}

/// Payload description for one media type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    /// Payload schema
    pub schema: Option<Schema>,

    /// Explicit example
    pub example: Option<Value>,

    /// Named examples, in declaration order
    #[serde(default)]
    pub examples: IndexMap<String, ReferenceOr<Example>>,
}

impl MediaType {
    /// Value of the first named example, if it is inline and carries a value.
    pub fn first_named_example(&self) -> Option<&Value> {
        self.examples
            .values()
            .next()
            .and_then(ReferenceOr::as_item)
            .and_then(|e| e.value.as_ref())
    }
}

/// A named example.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Example {
    /// Short summary
    pub summary: Option<String>,

    /// Description
    pub description: Option<String>,

    /// Example value
    pub value: Option<Value>,
}

/// One declared response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Description
    pub description: Option<String>,

    /// Content by media type, in declaration order
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_deserialize() {
        let op: Operation = serde_json::from_value(json!({
            "summary": "Get pet",
            "parameters": [
                {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}},
                {"name": "verbose", "in": "query"},
                {"$ref": "#/components/parameters/Trace"}
            ],
            "responses": {
                "200": {"description": "OK"},
                "404": {"$ref": "#/components/responses/NotFound"}
            },
            "security": [{"apiKey": []}]
        }))
        .unwrap();

        assert_eq!(op.parameters.len(), 3);
        assert_eq!(op.parameters().count(), 2);
        assert_eq!(op.parameters_in(ParameterLocation::Query).count(), 1);
        assert_eq!(op.responses().count(), 1);
        assert!(op.requires_security());
    }

    #[test]
    fn test_empty_security_is_not_required() {
        let op: Operation = serde_json::from_value(json!({"security": []})).unwrap();
        assert!(!op.requires_security());
        assert!(!Operation::default().requires_security());
    }

    #[test]
    fn test_first_named_example() {
        let media: MediaType = serde_json::from_value(json!({
            "examples": {
                "first": {"value": {"id": 1}},
                "second": {"value": {"id": 2}}
            }
        }))
        .unwrap();
        assert_eq!(media.first_named_example(), Some(&json!({"id": 1})));
    }

    #[test]
    fn test_method_from_key() {
        assert_eq!(HttpMethod::from_key("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("patch"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_key("parameters"), None);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
