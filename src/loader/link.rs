//! Post-load linking of component-backed objects.
//!
//! Parameters, request bodies and responses may be `$ref`s into
//! `#/components/...`. Linking replaces each such pointer with a copy of the
//! referenced object so that document generation only sees inline items.
//! Schemas are left untouched; they are resolved lazily by the resolver.
//!
//! A pointer that names no component is kept as a placeholder so the
//! operation still documents it: an empty response or body, or the
//! unlinked reference for parameters, whose location is unknown.

use indexmap::IndexMap;

use crate::spec::{
    component_name, Components, Parameter, ReferenceOr, RequestBody, Response, Specification,
};

use super::LoadOptions;

/// Link references and merge path-level parameters in place.
pub(crate) fn link_specification(spec: &mut Specification, options: &LoadOptions) {
    let components = &spec.components;
    let mut dangling = 0usize;

    for (path, item) in spec.paths.iter_mut() {
        let shared: Vec<ReferenceOr<Parameter>> = if options.link_components {
            link_all(&item.parameters, "parameters", &components.parameters, &mut dangling)
        } else {
            item.parameters.clone()
        };

        for (method, op) in item.operations.iter_mut() {
            if options.link_components {
                op.parameters =
                    link_all(&op.parameters, "parameters", &components.parameters, &mut dangling);

                op.request_body = op.request_body.as_ref().map(|body| {
                    link_one(body, "requestBodies", &components.request_bodies, &mut dangling)
                });

                op.responses = op
                    .responses
                    .iter()
                    .map(|(code, r)| {
                        let linked = link_one(r, "responses", &components.responses, &mut dangling);
                        (code.clone(), linked)
                    })
                    .collect();
            }

            if options.merge_path_parameters && !shared.is_empty() {
                op.parameters = merge_parameters(&shared, &op.parameters);
                log::debug!(
                    "Merged {} path-level parameter(s) into {} {}",
                    shared.len(),
                    method,
                    path
                );
            }
        }
    }

    if dangling > 0 {
        log::debug!("Kept {} unresolvable component reference(s) as placeholders", dangling);
    }
}

/// Path-level parameters come first; an operation parameter with the same
/// name and location replaces its path-level counterpart.
fn merge_parameters(
    shared: &[ReferenceOr<Parameter>],
    own: &[ReferenceOr<Parameter>],
) -> Vec<ReferenceOr<Parameter>> {
    let overridden = |p: &Parameter| {
        own.iter()
            .filter_map(ReferenceOr::as_item)
            .any(|o| o.name == p.name && o.location == p.location)
    };

    shared
        .iter()
        .filter(|s| s.as_item().map_or(true, |p| !overridden(p)))
        .chain(own.iter())
        .cloned()
        .collect()
}

/// What a reference that names no component links to.
trait Placeholder: Sized {
    fn placeholder(reference: &str) -> ReferenceOr<Self>;
}

impl Placeholder for Parameter {
    fn placeholder(reference: &str) -> ReferenceOr<Self> {
        ReferenceOr::Reference {
            reference: reference.to_string(),
        }
    }
}

impl Placeholder for RequestBody {
    fn placeholder(_reference: &str) -> ReferenceOr<Self> {
        ReferenceOr::Item(RequestBody::default())
    }
}

impl Placeholder for Response {
    fn placeholder(_reference: &str) -> ReferenceOr<Self> {
        ReferenceOr::Item(Response::default())
    }
}

fn link_all<T: Clone + Placeholder>(
    items: &[ReferenceOr<T>],
    section: &str,
    table: &IndexMap<String, ReferenceOr<T>>,
    dangling: &mut usize,
) -> Vec<ReferenceOr<T>> {
    items
        .iter()
        .map(|item| link_one(item, section, table, dangling))
        .collect()
}

fn link_one<T: Clone + Placeholder>(
    item: &ReferenceOr<T>,
    section: &str,
    table: &IndexMap<String, ReferenceOr<T>>,
    dangling: &mut usize,
) -> ReferenceOr<T> {
    match item {
        ReferenceOr::Item(_) => item.clone(),
        ReferenceOr::Reference { reference } => match lookup(reference, section, table) {
            Some(found) => ReferenceOr::Item(found.clone()),
            None => {
                log::debug!("Unresolved {} reference: {}", section, reference);
                *dangling += 1;
                T::placeholder(reference)
            }
        },
    }
}

/// Follow a chain of component references. Chains longer than the table
/// itself must contain a cycle and resolve to nothing.
fn lookup<'a, T>(
    reference: &str,
    section: &str,
    table: &'a IndexMap<String, ReferenceOr<T>>,
) -> Option<&'a T> {
    let mut current = reference;

    for _ in 0..=table.len() {
        let name = component_name(current, section)?;
        match table.get(&name)? {
            ReferenceOr::Item(item) => return Some(item),
            ReferenceOr::Reference { reference } => current = reference,
        }
    }

    None
}

/// Check whether any component of the given kinds is present.
pub(crate) fn has_linkable_components(components: &Components) -> bool {
    !components.parameters.is_empty()
        || !components.request_bodies.is_empty()
        || !components.responses.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{HttpMethod, ParameterLocation};
    use serde_json::json;

    fn spec_from(value: serde_json::Value) -> Specification {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_link_parameter_and_response_refs() {
        let mut spec = spec_from(json!({
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [
                            {"$ref": "#/components/parameters/Limit"},
                            {"$ref": "#/components/parameters/Missing"}
                        ],
                        "requestBody": {"$ref": "#/components/requestBodies/Gone"},
                        "responses": {
                            "200": {"$ref": "#/components/responses/Ok"},
                            "404": {"$ref": "#/components/responses/Missing"}
                        }
                    }
                }
            },
            "components": {
                "parameters": {
                    "Limit": {"$ref": "#/components/parameters/RealLimit"},
                    "RealLimit": {"name": "limit", "in": "query"}
                },
                "responses": {
                    "Ok": {"description": "fine"}
                }
            }
        }));

        link_specification(&mut spec, &LoadOptions::default());

        let op = &spec.paths["/pets"].operations[&HttpMethod::Get];
        assert_eq!(op.parameters.len(), 2);
        assert_eq!(
            op.parameters[1].as_reference(),
            Some("#/components/parameters/Missing")
        );
        let limit = op.parameters().next().unwrap();
        assert_eq!(limit.name, "limit");
        assert_eq!(limit.location, ParameterLocation::Query);

        let responses: Vec<(&str, Option<&str>)> = op
            .responses()
            .map(|(code, r)| (code, r.description.as_deref()))
            .collect();
        assert_eq!(responses, vec![("200", Some("fine")), ("404", None)]);
        assert_eq!(op.request_body(), Some(&RequestBody::default()));
    }

    #[test]
    fn test_reference_cycle_stays_unlinked() {
        let mut spec = spec_from(json!({
            "paths": {"/x": {"get": {"parameters": [{"$ref": "#/components/parameters/A"}]}}},
            "components": {
                "parameters": {
                    "A": {"$ref": "#/components/parameters/B"},
                    "B": {"$ref": "#/components/parameters/A"}
                }
            }
        }));

        link_specification(&mut spec, &LoadOptions::default());
        let op = &spec.paths["/x"].operations[&HttpMethod::Get];
        assert_eq!(op.parameters.len(), 1);
        assert_eq!(op.parameters().count(), 0);
    }

    #[test]
    fn test_merge_path_parameters() {
        let mut spec = spec_from(json!({
            "paths": {
                "/pets/{id}": {
                    "parameters": [
                        {"name": "id", "in": "path", "required": true},
                        {"name": "trace", "in": "header", "description": "shared"}
                    ],
                    "get": {
                        "parameters": [
                            {"name": "trace", "in": "header", "description": "own"},
                            {"name": "q", "in": "query"}
                        ]
                    }
                }
            }
        }));

        link_specification(&mut spec, &LoadOptions::default());

        let op = &spec.paths["/pets/{id}"].operations[&HttpMethod::Get];
        let names: Vec<(&str, Option<&str>)> = op
            .parameters()
            .map(|p| (p.name.as_str(), p.description.as_deref()))
            .collect();
        assert_eq!(
            names,
            vec![("id", None), ("trace", Some("own")), ("q", None)]
        );
    }

    #[test]
    fn test_linking_disabled_keeps_references() {
        let mut spec = spec_from(json!({
            "paths": {"/x": {"get": {"parameters": [{"$ref": "#/components/parameters/A"}]}}},
            "components": {"parameters": {"A": {"name": "a", "in": "query"}}}
        }));
        assert!(has_linkable_components(&spec.components));

        link_specification(&mut spec, &LoadOptions::new().with_linking(false));
        let op = &spec.paths["/x"].operations[&HttpMethod::Get];
        assert_eq!(op.parameters.len(), 1);
        assert_eq!(op.parameters().count(), 0);
    }
}
