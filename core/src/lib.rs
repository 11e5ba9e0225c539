#![deny(missing_docs)]

//! # Swagger2 Core
//!
//! Turns a Swagger 2.0 document into a flat list of self-contained endpoint
//! descriptors. Every `#/definitions/...` reference is inlined; cycles and
//! unknown references are marked in place instead of aborting extraction.

/// Shared error types.
pub mod error;

/// Swagger 2.0 parsing, resolution and extraction.
pub mod oas;

pub use error::{AppError, AppResult};
pub use oas::{
    extract_endpoints, extract_endpoints_from_path, extract_endpoints_with_options,
    load_swagger_document, merge_parameters, parse_swagger_json, parse_swagger_yaml,
    resolve_schema, sort_endpoints, EndpointDescriptor, ExtractOptions, HttpMethod, Parameter,
    RefPath, RequestBody, SchemaMap, SchemaNode, SchemaResolver, DEFAULT_MAX_DEPTH,
};
