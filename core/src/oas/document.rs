#![deny(missing_docs)]

//! # Swagger Document Loading
//!
//! Reads a Swagger 2.0 document into a `serde_json::Value`, keeping the
//! source key order. JSON is the primary format; `.yaml` / `.yml` files are
//! read as YAML.

use crate::error::AppResult;
use crate::oas::models::EndpointDescriptor;
use crate::oas::routes::{extract_endpoints_with_options, ExtractOptions};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parses a JSON document.
pub fn parse_swagger_json(content: &str) -> AppResult<Value> {
    Ok(serde_json::from_str(content)?)
}

/// Parses a YAML document.
pub fn parse_swagger_yaml(content: &str) -> AppResult<Value> {
    Ok(serde_yaml::from_str(content)?)
}

/// Loads a document from disk, picking the parser from the file extension.
pub fn load_swagger_document(path: &Path) -> AppResult<Value> {
    let content = fs::read_to_string(path)?;

    if is_yaml_path(path) {
        parse_swagger_yaml(&content)
    } else {
        parse_swagger_json(&content)
    }
}

/// Loads a document from disk and extracts its endpoints.
pub fn extract_endpoints_from_path(
    path: &Path,
    options: &ExtractOptions,
) -> AppResult<Vec<EndpointDescriptor>> {
    let document = load_swagger_document(path)?;
    tracing::info!(path = ?path, "loaded Swagger document");
    extract_endpoints_with_options(&document, options)
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}
