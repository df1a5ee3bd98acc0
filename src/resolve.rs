//! Schema reference and composition resolution.

use std::borrow::Cow;

use crate::spec::{Components, Schema, SchemaType};

/// Resolves `$ref` pointers and flattens `allOf` composition.
///
/// The components lookup is borrowed immutably and never modified. A
/// reference that cannot be found (or that re-enters a schema already being
/// expanded) resolves to the unresolved stub itself.
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'a> {
    components: &'a Components,
}

impl<'a> SchemaResolver<'a> {
    /// Create a resolver over a components lookup.
    pub fn new(components: &'a Components) -> Self {
        Self { components }
    }

    /// Resolve a schema.
    ///
    /// A reference is substituted by the named component, one level deep. If
    /// the result carries `allOf`, its branches are resolved recursively and
    /// merged: the first branch declaring a property wins, required names are
    /// unioned and the composite's own description is kept. Anything else is
    /// returned unchanged.
    pub fn resolve<'s>(&self, schema: &'s Schema) -> Cow<'s, Schema>
    where
        'a: 's,
    {
        let mut stack = Vec::new();
        self.resolve_with_stack(schema, &mut stack)
    }

    /// Resolve an optional schema.
    pub fn resolve_opt<'s>(&self, schema: Option<&'s Schema>) -> Option<Cow<'s, Schema>>
    where
        'a: 's,
    {
        schema.map(|s| self.resolve(s))
    }

    fn resolve_with_stack<'s>(&self, schema: &'s Schema, stack: &mut Vec<String>) -> Cow<'s, Schema>
    where
        'a: 's,
    {
        let mut pushed = None;
        let mut target: &'s Schema = schema;

        if let Some(name) = schema.reference_name() {
            if stack.contains(&name) {
                log::debug!("Schema reference cycle through {}; keeping stub", name);
                return Cow::Borrowed(schema);
            }
            match self.components.schema(&name) {
                Some(found) => {
                    target = found;
                    pushed = Some(name);
                }
                None => return Cow::Borrowed(schema),
            }
        }

        if target.all_of.is_empty() {
            return Cow::Borrowed(target);
        }

        if let Some(name) = pushed.as_ref() {
            stack.push(name.clone());
        }
        let merged = self.merge_all_of(target, stack);
        if pushed.is_some() {
            stack.pop();
        }

        Cow::Owned(merged)
    }

    fn merge_all_of<'s>(&self, composite: &'s Schema, stack: &mut Vec<String>) -> Schema
    where
        'a: 's,
    {
        let mut merged = Schema::of_type(SchemaType::Object);

        for branch in &composite.all_of {
            let resolved = self.resolve_with_stack(branch, stack);
            for (name, property) in &resolved.properties {
                if !merged.properties.contains_key(name) {
                    merged.properties.insert(name.clone(), property.clone());
                }
            }
            merged.required.extend(resolved.required.iter().cloned());
        }

        if composite.description.as_deref().is_some_and(|d| !d.is_empty()) {
            merged.description = composite.description.clone();
        }

        merged
    }
}

/// Resolve a schema against a components lookup.
pub fn resolve<'s>(schema: &'s Schema, components: &'s Components) -> Cow<'s, Schema> {
    SchemaResolver::new(components).resolve(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn components(value: serde_json::Value) -> Components {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_plain_schema_unchanged() {
        let comps = Components::default();
        let schema = Schema::of_type(SchemaType::String);
        let resolved = resolve(&schema, &comps);
        assert!(matches!(resolved, Cow::Borrowed(_)));
        assert_eq!(*resolved, schema);
    }

    #[test]
    fn test_reference_substituted() {
        let comps = components(json!({
            "schemas": {
                "Pet": {"type": "object", "properties": {"name": {"type": "string"}}}
            }
        }));
        let stub = Schema::reference("Pet");
        let resolved = resolve(&stub, &comps).into_owned();
        assert!(resolved.reference.is_none());
        assert!(resolved.properties.contains_key("name"));
    }

    #[test]
    fn test_reference_is_single_level() {
        let comps = components(json!({
            "schemas": {
                "Alias": {"$ref": "#/components/schemas/Pet"},
                "Pet": {"type": "object", "properties": {"name": {"type": "string"}}}
            }
        }));
        let stub = Schema::reference("Alias");
        let resolved = resolve(&stub, &comps);
        assert_eq!(resolved.reference_name(), Some("Pet".to_string()));
        assert!(!resolved.has_properties());
    }

    #[test]
    fn test_unresolved_reference_returns_stub() {
        let comps = Components::default();
        let stub = Schema::reference("Missing");
        assert_eq!(*resolve(&stub, &comps), stub);
    }

    #[test]
    fn test_all_of_merge() {
        let comps = components(json!({
            "schemas": {
                "Base": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": {"type": "integer"},
                        "name": {"type": "string", "description": "base name"}
                    }
                }
            }
        }));
        let composite: Schema = serde_json::from_value(json!({
            "description": "A pet",
            "allOf": [
                {"$ref": "#/components/schemas/Base"},
                {
                    "type": "object",
                    "required": ["tag"],
                    "properties": {
                        "name": {"type": "integer", "description": "override"},
                        "tag": {"type": "string"}
                    }
                }
            ]
        }))
        .unwrap();

        let merged = resolve(&composite, &comps);
        let names: Vec<&str> = merged.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "name", "tag"]);
        assert_eq!(
            merged.properties["name"].description.as_deref(),
            Some("base name")
        );
        assert!(merged.is_required("id") && merged.is_required("tag"));
        assert_eq!(merged.description.as_deref(), Some("A pet"));
        assert_eq!(merged.schema_type, Some(SchemaType::Object));
    }

    #[test]
    fn test_self_referential_all_of_terminates() {
        let comps = components(json!({
            "schemas": {
                "Node": {
                    "allOf": [
                        {"$ref": "#/components/schemas/Node"},
                        {"properties": {"value": {"type": "string"}}}
                    ]
                }
            }
        }));
        let stub = Schema::reference("Node");
        let resolved = resolve(&stub, &comps);
        assert!(resolved.properties.contains_key("value"));
    }

    #[test]
    fn test_components_untouched() {
        let comps = components(json!({
            "schemas": {"A": {"allOf": [{"properties": {"x": {"type": "string"}}}]}}
        }));
        let before = comps.clone();
        let _ = resolve(&Schema::reference("A"), &comps);
        assert_eq!(comps, before);
    }
}
