//! `$ref` handling shared by schemas and component-backed objects.

use serde::Deserialize;

/// Either an inline object or a `$ref` pointing at a component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReferenceOr<T> {
    /// A `{"$ref": "..."}` pointer.
    Reference {
        /// The raw reference string (e.g. `#/components/parameters/Limit`).
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// An inline object.
    Item(T),
}

impl<T> ReferenceOr<T> {
    /// Wrap an inline object.
    pub fn item(item: T) -> Self {
        ReferenceOr::Item(item)
    }

    /// Create a reference to a named component in the given section.
    pub fn component(section: &str, name: &str) -> Self {
        ReferenceOr::Reference {
            reference: format!("#/components/{}/{}", section, name),
        }
    }

    /// Get the inline object, if this is not a reference.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            ReferenceOr::Item(item) => Some(item),
            ReferenceOr::Reference { .. } => None,
        }
    }

    /// Get the raw reference string, if this is a reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            ReferenceOr::Reference { reference } => Some(reference),
            ReferenceOr::Item(_) => None,
        }
    }
}

/// Extract the component name from a local reference of the form
/// `#/components/{section}/{name}`.
///
/// Returns `None` for external references or references into another section.
pub fn component_name(reference: &str, section: &str) -> Option<String> {
    let pointer = reference.strip_prefix("#/")?;
    let mut segments = pointer.splitn(3, '/');

    if segments.next()? != "components" || segments.next()? != section {
        return None;
    }

    let name = decode_pointer_segment(segments.next()?);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_local() {
        assert_eq!(
            component_name("#/components/schemas/User", "schemas"),
            Some("User".to_string())
        );
    }

    #[test]
    fn test_component_name_wrong_section() {
        assert_eq!(component_name("#/components/responses/User", "schemas"), None);
    }

    #[test]
    fn test_component_name_external() {
        assert_eq!(
            component_name("other.yaml#/components/schemas/User", "schemas"),
            None
        );
        assert_eq!(component_name("#/definitions/User", "schemas"), None);
    }

    #[test]
    fn test_component_name_pointer_escapes() {
        assert_eq!(
            component_name("#/components/schemas/a~1b~0c", "schemas"),
            Some("a/b~c".to_string())
        );
    }

    #[test]
    fn test_reference_or_deserialize() {
        let r: ReferenceOr<serde_json::Value> =
            serde_json::from_str(r##"{"$ref": "#/components/parameters/Limit"}"##).unwrap();
        assert_eq!(r.as_reference(), Some("#/components/parameters/Limit"));

        let item: ReferenceOr<serde_json::Value> =
            serde_json::from_str(r#"{"name": "limit"}"#).unwrap();
        assert!(item.as_item().is_some());
    }
}
