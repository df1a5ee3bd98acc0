//! In-memory object model for API specifications.
//!
//! These types cover the subset of the OpenAPI 3.x object model that
//! document generation needs. They deserialize directly from JSON or YAML
//! and are never mutated after [`crate::loader::SpecLoader`] hands them out.

mod document;
mod operation;
mod reference;
mod schema;

pub use document::{Components, Info, PathItem, Server, Specification};
pub use operation::{
    Example, HttpMethod, MediaType, Operation, Parameter, ParameterLocation, RequestBody, Response,
};
pub use reference::{component_name, ReferenceOr};
pub use schema::{Schema, SchemaType};
