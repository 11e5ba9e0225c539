#![deny(missing_docs)]

//! # Endpoint Models
//!
//! Output records of the extractor.
//!
//! An `EndpointDescriptor` is built once per (path, method) pair and is
//! self-contained: every schema it carries has already been resolved.
//! Serialized field names are part of the output contract.

use crate::oas::schema::{SchemaMap, SchemaNode};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// HTTP methods a Swagger 2.0 path item can hold operations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl HttpMethod {
    /// Every supported method, in canonical order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Maps a path item key to a method, ignoring ASCII case.
    ///
    /// Returns `None` for non-method keys such as `parameters` or `x-*`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(key))
    }

    /// Upper-case verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One merged operation parameter.
///
/// Holds the parameter object as written in the document, in source key
/// order, with its `schema` and `items` fields resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameter(pub SchemaMap);

impl Parameter {
    /// The `name` field.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(SchemaNode::as_str)
    }

    /// The `in` field (`query`, `path`, `header`, `body` or `formData`).
    pub fn location(&self) -> Option<&str> {
        self.get("in").and_then(SchemaNode::as_str)
    }

    /// The resolved `schema` field, if any.
    pub fn schema(&self) -> Option<&SchemaNode> {
        self.get("schema")
    }

    /// Looks up any field.
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.0.get(key)
    }

    /// All fields.
    pub fn fields(&self) -> &SchemaMap {
        &self.0
    }
}

/// The request body of an operation, taken from its `in: body` parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    /// Always `body`.
    #[serde(rename = "in")]
    pub location: String,
    /// Parameter name, `body` when unnamed.
    pub name: String,
    /// Whether the body is required.
    ///
    /// Only a JSON `true` counts; truthy strings or numbers such as `"true"` or `1` give `false`.
    pub required: bool,
    /// Resolved body schema.
    pub schema: Option<SchemaNode>,
    /// Parameter description.
    pub description: Option<String>,
}

/// A fully resolved (path, method) operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointDescriptor {
    /// URL path template, e.g. `/users/{id}`.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Operation summary, empty when absent.
    pub summary: String,
    /// Operation description.
    pub description: Option<String>,
    /// Merged path-level and operation-level parameters.
    pub parameters: Vec<Parameter>,
    /// The body parameter, if the operation declares one.
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code (or `default`).
    pub responses: IndexMap<String, SchemaNode>,
    /// Operation tags.
    pub tags: Vec<String>,
    /// The `operationId`.
    pub operation_id: Option<String>,
    /// References that could not be resolved while building this descriptor.
    pub unresolved_refs: Vec<String>,
}

impl EndpointDescriptor {
    /// Whether any schema of this endpoint is only partially resolved.
    pub fn has_unresolved_refs(&self) -> bool {
        !self.unresolved_refs.is_empty()
    }

    /// Looks up a merged parameter by (`name`, `in`).
    pub fn parameter(&self, name: &str, location: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name() == Some(name) && p.location() == Some(location))
    }

    /// The resolved schema of a response, if the response declares one.
    pub fn response_schema(&self, status: &str) -> Option<&SchemaNode> {
        self.responses.get(status)?.get("schema")
    }
}
