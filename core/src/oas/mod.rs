#![deny(missing_docs)]

//! # Swagger 2.0 Module
//!
//! - **document**: Loading documents from disk or strings.
//! - **ref_utils**: Mapping `$ref` strings onto `definitions`.
//! - **schema**: The resolved schema tree and its markers.
//! - **resolver**: Recursive `$ref` inlining with cycle detection.
//! - **models**: Endpoint descriptor records.
//! - **routes**: Walking `paths` and building descriptors.

pub mod document;
pub mod models;
pub mod ref_utils;
pub mod resolver;
pub mod routes;
pub mod schema;

pub use document::{
    extract_endpoints_from_path, load_swagger_document, parse_swagger_json, parse_swagger_yaml,
};
pub use models::{EndpointDescriptor, HttpMethod, Parameter, RequestBody};
pub use resolver::{resolve_schema, RefPath, SchemaResolver, DEFAULT_MAX_DEPTH};
pub use routes::params::merge_parameters;
pub use routes::{extract_endpoints, extract_endpoints_with_options, sort_endpoints, ExtractOptions};
pub use schema::{SchemaMap, SchemaNode, CIRCULAR_REF_KEY, UNRESOLVED_REF_KEY};
