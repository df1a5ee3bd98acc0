//! Document-level types.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{HttpMethod, Operation, Parameter, ReferenceOr, RequestBody, Response, Schema};

/// A parsed API specification.
///
/// Immutable once loaded; every build borrows it read-only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Specification {
    /// Declared OpenAPI version (e.g. "3.0.3")
    #[serde(default, deserialize_with = "scalar_string")]
    pub openapi: Option<String>,

    /// API metadata
    #[serde(default)]
    pub info: Info,

    /// Base URLs
    #[serde(default)]
    pub servers: Vec<Server>,

    /// Path templates and their operations, in document order
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Named reusable definitions
    #[serde(default)]
    pub components: Components,
}

impl Specification {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over every operation as `(path, method, operation)`, in
    /// document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations
                .iter()
                .map(move |(method, op)| (path.as_str(), *method, op))
        })
    }

    /// Total number of operations.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|p| p.operations.len()).sum()
    }

    /// URL of the first declared server.
    pub fn first_server_url(&self) -> Option<&str> {
        self.servers.first().map(|s| s.url.as_str())
    }
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Info {
    /// API title
    pub title: Option<String>,

    /// API version
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,

    /// Description
    pub description: Option<String>,
}

/// Accept version fields written as bare numbers (`version: 1.2`).
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// A server entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Server {
    /// Base URL
    pub url: String,

    /// Description
    pub description: Option<String>,
}

/// Named reusable definitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Named schemas
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,

    /// Named parameters
    #[serde(default)]
    pub parameters: IndexMap<String, ReferenceOr<Parameter>>,

    /// Named request bodies
    #[serde(default)]
    pub request_bodies: IndexMap<String, ReferenceOr<RequestBody>>,

    /// Named responses
    #[serde(default)]
    pub responses: IndexMap<String, ReferenceOr<Response>>,
}

impl Components {
    /// Look up a schema by component name.
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }
}

/// Operations available on one path template.
///
/// Method keys keep their document order; non-method keys other than
/// `summary`, `description` and `parameters` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct PathItem {
    /// Short summary
    pub summary: Option<String>,

    /// Description
    pub description: Option<String>,

    /// Parameters shared by every operation on this path
    pub parameters: Vec<ReferenceOr<Parameter>>,

    /// Operations by method, in document order
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl PathItem {
    /// Add an operation and return self.
    pub fn with_operation(mut self, method: HttpMethod, operation: Operation) -> Self {
        self.operations.insert(method, operation);
        self
    }
}

impl TryFrom<IndexMap<String, Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(raw: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let mut item = PathItem::default();

        for (key, value) in raw {
            if let Some(method) = HttpMethod::from_key(&key) {
                item.operations
                    .insert(method, serde_json::from_value(value)?);
                continue;
            }

            match key.as_str() {
                "summary" => item.summary = serde_json::from_value(value)?,
                "description" => item.description = serde_json::from_value(value)?,
                "parameters" => item.parameters = serde_json::from_value(value)?,
                _ => {}
            }
        }

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_item_keeps_method_order() {
        let item: PathItem = serde_json::from_value(json!({
            "summary": "Pets",
            "post": {"summary": "create"},
            "parameters": [{"name": "tenant", "in": "header"}],
            "get": {"summary": "list"},
            "x-internal": true
        }))
        .unwrap();

        let methods: Vec<HttpMethod> = item.operations.keys().copied().collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
        assert_eq!(item.parameters.len(), 1);
        assert_eq!(item.summary.as_deref(), Some("Pets"));
    }

    #[test]
    fn test_specification_operations_order() {
        let spec: Specification = serde_json::from_value(json!({
            "openapi": "3.0.3",
            "info": {"title": "Demo", "version": "2.1"},
            "servers": [{"url": "https://api.example.com"}, {"url": "https://backup"}],
            "paths": {
                "/b": {"get": {}},
                "/a": {"delete": {}, "put": {}}
            }
        }))
        .unwrap();

        let ops: Vec<(String, HttpMethod)> = spec
            .operations()
            .map(|(p, m, _)| (p.to_string(), m))
            .collect();
        assert_eq!(
            ops,
            vec![
                ("/b".to_string(), HttpMethod::Get),
                ("/a".to_string(), HttpMethod::Delete),
                ("/a".to_string(), HttpMethod::Put),
            ]
        );
        assert_eq!(spec.operation_count(), 3);
        assert_eq!(spec.first_server_url(), Some("https://api.example.com"));
    }

    #[test]
    fn test_numeric_version_fields() {
        let spec: Specification =
            serde_json::from_value(json!({"openapi": 3.1, "info": {"version": 2}})).unwrap();
        assert_eq!(spec.openapi.as_deref(), Some("3.1"));
        assert_eq!(spec.info.version.as_deref(), Some("2"));
    }
}
