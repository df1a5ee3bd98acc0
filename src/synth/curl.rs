//! Example command-line invocation synthesis.

use crate::resolve::SchemaResolver;
use crate::settings::RenderSettings;
use crate::spec::{Components, HttpMethod, Operation, Parameter, ParameterLocation};

use super::example::{default_value, default_value_of, media_example, sample_json, value_to_string};

/// Base URL placeholder used when none is configured.
pub const BASE_URL_PLACEHOLDER: &str = "[baseUrl]";

/// Builds one example `curl` invocation per operation.
///
/// Parts are always emitted in the same order: method and URL (path
/// parameters substituted, query string appended), declared header flags,
/// the authentication header, then the content type and body.
#[derive(Debug, Clone)]
pub struct CurlSynthesizer<'a> {
    resolver: SchemaResolver<'a>,
    base_url: String,
    auth: Option<(String, String)>,
}

impl<'a> CurlSynthesizer<'a> {
    /// Create a synthesizer with the placeholder base URL and no authentication.
    pub fn new(components: &'a Components) -> Self {
        Self {
            resolver: SchemaResolver::new(components),
            base_url: BASE_URL_PLACEHOLDER.to_string(),
            auth: None,
        }
    }

    /// Create a synthesizer configured from render settings.
    pub fn from_settings(components: &'a Components, settings: &RenderSettings) -> Self {
        let mut synth = Self::new(components).with_base_url(&settings.base_url_placeholder);
        if settings.auth_required {
            synth = synth.with_auth(&settings.auth_header_name, &settings.auth_header_value);
        }
        synth
    }

    /// Set the base URL prefix.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Require an authentication header on every invocation.
    pub fn with_auth(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.auth = Some((name.into(), value.into()));
        self
    }

    /// Build the invocation for one operation.
    pub fn synthesize(&self, path: &str, method: HttpMethod, operation: &Operation) -> String {
        let mut url = format!("{}{}", self.base_url, path);

        for param in operation.parameters_in(ParameterLocation::Path) {
            let token = format!("{{{}}}", param.name);
            let schema = self.resolver.resolve_opt(param.schema.as_ref());
            url = url.replace(&token, &default_value_of(schema.as_deref(), "1"));
        }

        let query: Vec<String> = operation
            .parameters_in(ParameterLocation::Query)
            .map(|p| format!("{}={}", p.name, self.parameter_default(p)))
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }

        let mut command = format!("curl -X {} \"{}\"", method.as_str(), url);

        for header in operation.parameters_in(ParameterLocation::Header) {
            command.push_str(&format!(
                " -H \"{}: {}\"",
                header.name,
                self.parameter_default(header)
            ));
        }

        if let Some((name, value)) = &self.auth {
            command.push_str(&format!(" -H \"{}: {}\"", name, value));
        }

        if let Some((media_type, media)) = operation
            .request_body()
            .and_then(|body| body.content.first())
        {
            command.push_str(&format!(" -H \"Content-Type: {}\"", media_type));

            let payload = match media_example(media) {
                Some(example) => Some(value_to_string(example)),
                None => media
                    .schema
                    .as_ref()
                    .map(|schema| sample_json(&self.resolver.resolve(schema))),
            };

            if let Some(payload) = payload.filter(|p| !p.trim().is_empty()) {
                command.push_str(&format!(" -d \"{}\"", payload.replace('"', "\\\"")));
            }
        }

        command.trim().to_string()
    }

    fn parameter_default(&self, param: &Parameter) -> String {
        let schema = self.resolver.resolve_opt(param.schema.as_ref());
        default_value(schema.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ReferenceOr;
    use serde_json::json;

    fn operation(value: serde_json::Value) -> Operation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_path_parameter_fallback() {
        let comps = Components::default();
        let op = Operation {
            parameters: vec![ReferenceOr::item(Parameter::new("id", ParameterLocation::Path))],
            ..Default::default()
        };
        assert_eq!(
            CurlSynthesizer::new(&comps).synthesize("/pets/{id}", HttpMethod::Get, &op),
            r#"curl -X GET "[baseUrl]/pets/1""#
        );
    }

    #[test]
    fn test_query_and_header_order() {
        let comps = Components::default();
        let op = operation(json!({
            "parameters": [
                {"name": "X-Trace", "in": "header"},
                {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 20}},
                {"name": "sort", "in": "query"},
                {"name": "id", "in": "path", "required": true, "schema": {"default": "abc"}}
            ]
        }));

        let curl = CurlSynthesizer::new(&comps)
            .with_auth("Authorization", "Bearer {TOKEN}")
            .synthesize("/pets/{id}", HttpMethod::Delete, &op);

        assert_eq!(
            curl,
            r#"curl -X DELETE "[baseUrl]/pets/abc?limit=20&sort=sample" -H "X-Trace: sample" -H "Authorization: Bearer {TOKEN}""#
        );
    }

    #[test]
    fn test_parameter_schemas_resolved() {
        let comps: Components = serde_json::from_value(json!({
            "schemas": {
                "ItemId": {"type": "integer", "default": 42},
                "Order": {"type": "string", "default": "asc"},
                "Tenant": {"type": "string", "default": "acme"}
            }
        }))
        .unwrap();
        let op = operation(json!({
            "parameters": [
                {"name": "id", "in": "path", "schema": {"$ref": "#/components/schemas/ItemId"}},
                {"name": "order", "in": "query", "schema": {"$ref": "#/components/schemas/Order"}},
                {"name": "X-Tenant", "in": "header", "schema": {"$ref": "#/components/schemas/Tenant"}}
            ]
        }));

        let curl = CurlSynthesizer::new(&comps).synthesize("/items/{id}", HttpMethod::Get, &op);
        assert_eq!(
            curl,
            r#"curl -X GET "[baseUrl]/items/42?order=asc" -H "X-Tenant: acme""#
        );
    }

    #[test]
    fn test_body_from_resolved_schema() {
        let comps: Components = serde_json::from_value(json!({
            "schemas": {
                "Pet": {
                    "type": "object",
                    "properties": {"name": {"type": "string"}, "age": {"type": "integer"}}
                }
            }
        }))
        .unwrap();
        let op = operation(json!({
            "requestBody": {
                "content": {
                    "application/json": {"schema": {"$ref": "#/components/schemas/Pet"}},
                    "application/xml": {"example": "<pet/>"}
                }
            }
        }));

        let curl = CurlSynthesizer::new(&comps).synthesize("/pets", HttpMethod::Post, &op);
        assert_eq!(
            curl,
            r#"curl -X POST "[baseUrl]/pets" -H "Content-Type: application/json" -d "{\"name\":\"sample\",\"age\":1}""#
        );
    }

    #[test]
    fn test_body_explicit_example_wins() {
        let comps = Components::default();
        let op = operation(json!({
            "requestBody": {
                "content": {
                    "text/plain": {
                        "schema": {"type": "string"},
                        "example": "say \"hi\"",
                        "examples": {"other": {"value": "unused"}}
                    }
                }
            }
        }));

        let curl = CurlSynthesizer::new(&comps).synthesize("/echo", HttpMethod::Put, &op);
        assert!(curl.ends_with(r#"-H "Content-Type: text/plain" -d "say \"hi\"""#));
    }

    #[test]
    fn test_empty_payload_has_no_data_flag() {
        let comps = Components::default();
        let op = operation(json!({
            "requestBody": {"content": {"application/json": {"example": ""}}}
        }));
        let curl = CurlSynthesizer::new(&comps).synthesize("/x", HttpMethod::Post, &op);
        assert_eq!(
            curl,
            r#"curl -X POST "[baseUrl]/x" -H "Content-Type: application/json""#
        );
    }

    #[test]
    fn test_missing_schema_has_no_data_flag() {
        let comps = Components::default();
        let op = operation(json!({
            "requestBody": {"content": {"application/octet-stream": {}}}
        }));
        let curl = CurlSynthesizer::new(&comps).synthesize("/upload", HttpMethod::Post, &op);
        assert!(!curl.contains(" -d "));
    }

    #[test]
    fn test_from_settings() {
        let comps = Components::default();
        let settings = RenderSettings::default()
            .with_auth(true, "X-Api-Key", "secret")
            .with_base_url_placeholder("https://api.test");
        let curl = CurlSynthesizer::from_settings(&comps, &settings).synthesize(
            "/ping",
            HttpMethod::Get,
            &Operation::default(),
        );
        assert_eq!(
            curl,
            r#"curl -X GET "https://api.test/ping" -H "X-Api-Key: secret""#
        );
    }
}
