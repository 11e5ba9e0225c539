#![deny(missing_docs)]

//! # Routes Module
//!
//! Entry point for extracting endpoints from a Swagger 2.0 `paths` object.
//! Orchestrates Version Check -> Path Iteration -> Builder -> Descriptors.

pub mod builder;
pub mod params;

use crate::error::{AppError, AppResult};
use crate::oas::models::{EndpointDescriptor, HttpMethod};
use crate::oas::resolver::{SchemaResolver, DEFAULT_MAX_DEPTH};
use crate::oas::routes::builder::build_endpoint;
use serde_json::Value;

/// The only `swagger` version this extractor accepts.
pub const SUPPORTED_SWAGGER_VERSION: &str = "2.0";

/// Tuning knobs for an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Maximum nesting plus reference expansion depth per schema root.
    pub max_depth: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Extracts one descriptor per (path, method) pair with default options.
pub fn extract_endpoints(document: &Value) -> AppResult<Vec<EndpointDescriptor>> {
    extract_endpoints_with_options(document, &ExtractOptions::default())
}

/// Extracts one descriptor per (path, method) pair.
///
/// Descriptors come out in document order: paths as listed, then methods as
/// listed within each path item. Malformed path items and operations are
/// skipped, as are operations with a schema deeper than `options.max_depth`.
///
/// # Errors
///
/// * `AppError::ValueFormat` if `swagger` is not `"2.0"`.
pub fn extract_endpoints_with_options(
    document: &Value,
    options: &ExtractOptions,
) -> AppResult<Vec<EndpointDescriptor>> {
    ensure_swagger_2(document)?;

    let resolver = SchemaResolver::new(document).with_max_depth(options.max_depth);
    let mut endpoints = Vec::new();

    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        tracing::debug!("document has no paths object");
        return Ok(endpoints);
    };

    for (path, path_item) in paths {
        let Some(path_item) = path_item.as_object() else {
            tracing::debug!(path = %path, "skipping path item that is not an object");
            continue;
        };

        let path_params = path_item
            .get("parameters")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for (key, operation) in path_item {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            let Some(operation) = operation.as_object() else {
                tracing::debug!(
                    path = %path,
                    method = %method,
                    "skipping operation that is not an object"
                );
                continue;
            };

            let endpoint = match build_endpoint(&resolver, path, method, operation, path_params) {
                Ok(endpoint) => endpoint,
                Err(AppError::SchemaTooDeep { limit }) => {
                    tracing::warn!(
                        path = %path,
                        method = %method,
                        limit,
                        "skipping operation whose schema exceeds the depth limit"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };
            tracing::debug!(
                path = %path,
                method = %method,
                parameters = endpoint.parameters.len(),
                responses = endpoint.responses.len(),
                "extracted endpoint"
            );
            endpoints.push(endpoint);
        }
    }

    Ok(endpoints)
}

/// Sorts descriptors by path, then by method in canonical order.
///
/// Extraction itself keeps document order; this is for callers that need a
/// stable order across documents.
pub fn sort_endpoints(endpoints: &mut [EndpointDescriptor]) {
    endpoints.sort_by(|a, b| a.path.cmp(&b.path).then(a.method.cmp(&b.method)));
}

/// Version Validation
fn ensure_swagger_2(document: &Value) -> AppResult<()> {
    match document.get("swagger") {
        Some(Value::String(version)) if version == SUPPORTED_SWAGGER_VERSION => Ok(()),
        Some(other) => Err(AppError::ValueFormat(format!(
            "Unsupported Swagger version: {}. Only 2.0 is supported by this extractor.",
            other
        ))),
        None if document.get("openapi").is_some() => Err(AppError::ValueFormat(
            "OpenAPI 3.x documents are not supported: expected 'swagger: \"2.0\"'.".into(),
        )),
        None => Err(AppError::ValueFormat(
            "Invalid Swagger document: missing 'swagger' version field.".into(),
        )),
    }
}
