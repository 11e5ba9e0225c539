#![deny(missing_docs)]

//! # Endpoint Builder
//!
//! Turns one Swagger 2.0 operation object into an `EndpointDescriptor`.

use crate::error::AppResult;
use crate::oas::models::{EndpointDescriptor, HttpMethod, Parameter, RequestBody};
use crate::oas::resolver::SchemaResolver;
use crate::oas::routes::params::merge_parameters;
use crate::oas::schema::{SchemaMap, SchemaNode};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Parameter fields that hold schemas. `items` is used by non-body array parameters.
const PARAMETER_SCHEMA_FIELDS: [&str; 2] = ["schema", "items"];

/// Builds the descriptor of a single operation.
///
/// # Arguments
///
/// * `resolver` - Resolver bound to the owning document.
/// * `path` - The path template the operation lives under.
/// * `method` - The operation's HTTP method.
/// * `operation` - The operation object.
/// * `path_params` - The path item's shared `parameters`.
pub fn build_endpoint(
    resolver: &SchemaResolver<'_>,
    path: &str,
    method: HttpMethod,
    operation: &Map<String, Value>,
    path_params: &[Value],
) -> AppResult<EndpointDescriptor> {
    let mut unresolved = Vec::new();

    let op_params = operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut parameters = Vec::new();
    for param in merge_parameters(path_params, op_params) {
        parameters.push(resolve_parameter(resolver, &param, &mut unresolved)?);
    }

    let request_body = extract_request_body(&parameters);
    let responses = resolve_responses(resolver, operation, &mut unresolved)?;

    let descriptor = EndpointDescriptor {
        path: path.to_string(),
        method,
        summary: string_field(operation, "summary").unwrap_or_default(),
        description: string_field(operation, "description"),
        parameters,
        request_body,
        responses,
        tags: operation
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        operation_id: string_field(operation, "operationId"),
        unresolved_refs: unresolved,
    };

    if descriptor.has_unresolved_refs() {
        tracing::warn!(
            path,
            method = %method,
            unresolved = ?descriptor.unresolved_refs,
            "endpoint has unresolved references"
        );
    }

    Ok(descriptor)
}

/// Resolves the schema-bearing fields of a merged parameter.
fn resolve_parameter(
    resolver: &SchemaResolver<'_>,
    param: &Map<String, Value>,
    unresolved: &mut Vec<String>,
) -> AppResult<Parameter> {
    let mut fields = SchemaMap::with_capacity(param.len());
    for (key, value) in param {
        let node = if PARAMETER_SCHEMA_FIELDS.contains(&key.as_str()) {
            let resolved = resolver.resolve(value)?;
            resolved.collect_unresolved(unresolved);
            resolved
        } else {
            SchemaNode::from_value(value)
        };
        fields.insert(key.clone(), node);
    }
    Ok(Parameter(fields))
}

/// Picks the first `in: body` parameter.
///
/// Swagger 2.0 allows at most one; extra body parameters are ignored here
/// but stay in the parameter list.
fn extract_request_body(parameters: &[Parameter]) -> Option<RequestBody> {
    let body = parameters.iter().find(|p| p.location() == Some("body"))?;
    Some(RequestBody {
        location: "body".to_string(),
        name: body.name().unwrap_or("body").to_string(),
        required: matches!(body.get("required"), Some(SchemaNode::Bool(true))),
        schema: body.schema().cloned(),
        description: body
            .get("description")
            .and_then(SchemaNode::as_str)
            .map(str::to_string),
    })
}

/// Copies `responses`, resolving each response's `schema`.
fn resolve_responses(
    resolver: &SchemaResolver<'_>,
    operation: &Map<String, Value>,
    unresolved: &mut Vec<String>,
) -> AppResult<IndexMap<String, SchemaNode>> {
    let mut out = IndexMap::new();
    let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
        return Ok(out);
    };

    for (status, response) in responses {
        let node = match response.as_object() {
            Some(fields) => {
                let mut resolved = SchemaMap::with_capacity(fields.len());
                for (key, value) in fields {
                    let child = if key == "schema" {
                        let schema = resolver.resolve(value)?;
                        schema.collect_unresolved(unresolved);
                        schema
                    } else {
                        SchemaNode::from_value(value)
                    };
                    resolved.insert(key.clone(), child);
                }
                SchemaNode::Object(resolved)
            }
            None => SchemaNode::from_value(response),
        };
        out.insert(status.clone(), node);
    }

    Ok(out)
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(document: &Value, path: &str, method: &str) -> EndpointDescriptor {
        let resolver = SchemaResolver::new(document);
        let item = document["paths"][path].as_object().unwrap();
        let path_params = item
            .get("parameters")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        build_endpoint(
            &resolver,
            path,
            HttpMethod::from_key(method).unwrap(),
            item[method].as_object().unwrap(),
            &path_params,
        )
        .unwrap()
    }

    fn pet_store() -> Value {
        json!({
            "swagger": "2.0",
            "definitions": {
                "Pet": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": {"type": "string"},
                        "owner": {"$ref": "#/definitions/Owner"}
                    }
                },
                "Tag": {"type": "object", "properties": {"label": {"type": "string"}}}
            },
            "paths": {
                "/pets/{petId}": {
                    "parameters": [
                        {"name": "petId", "in": "path", "required": true, "type": "integer"}
                    ],
                    "put": {
                        "summary": "Replace a pet",
                        "operationId": "replacePet",
                        "tags": ["pets", 7],
                        "parameters": [
                            {"name": "petId", "in": "path", "required": true, "type": "string"},
                            {
                                "name": "pet",
                                "in": "body",
                                "required": true,
                                "description": "The new pet",
                                "schema": {"$ref": "#/definitions/Pet"}
                            },
                            {
                                "name": "tags",
                                "in": "query",
                                "type": "array",
                                "items": {"$ref": "#/definitions/Tag"}
                            }
                        ],
                        "responses": {
                            "200": {"description": "ok", "schema": {"$ref": "#/definitions/Pet"}},
                            "404": {"description": "missing"},
                            "default": "bogus"
                        }
                    },
                    "delete": {
                        "responses": {"204": {"description": "gone"}}
                    }
                }
            }
        })
    }

    #[test]
    fn test_request_body_from_body_parameter() {
        let document = pet_store();
        let endpoint = build(&document, "/pets/{petId}", "put");

        let body = endpoint.request_body.as_ref().unwrap();
        assert_eq!(body.location, "body");
        assert_eq!(body.name, "pet");
        assert!(body.required);
        assert_eq!(body.description.as_deref(), Some("The new pet"));
        assert_eq!(
            body.schema.as_ref(),
            endpoint.parameter("pet", "body").and_then(Parameter::schema)
        );
        assert_eq!(
            body.schema
                .as_ref()
                .and_then(|s| s.get("properties"))
                .and_then(|p| p.get("name"))
                .map(SchemaNode::to_value),
            Some(json!({"type": "string"}))
        );
    }

    #[test]
    fn test_no_body_parameter_means_no_request_body() {
        let document = pet_store();
        let endpoint = build(&document, "/pets/{petId}", "delete");
        assert!(endpoint.request_body.is_none());
        assert_eq!(endpoint.summary, "");
        assert!(endpoint.description.is_none());
        assert!(endpoint.operation_id.is_none());
        assert!(endpoint.tags.is_empty());
        // Path-level parameters still apply.
        assert!(endpoint.parameter("petId", "path").is_some());
    }

    #[test]
    fn test_parameters_are_merged_and_resolved() {
        let document = pet_store();
        let endpoint = build(&document, "/pets/{petId}", "put");

        assert_eq!(endpoint.parameters.len(), 3);
        let pet_id = endpoint.parameter("petId", "path").unwrap();
        assert_eq!(pet_id.get("type").and_then(SchemaNode::as_str), Some("string"));

        let tags = endpoint.parameter("tags", "query").unwrap();
        assert_eq!(
            tags.get("items").map(SchemaNode::to_value),
            Some(json!({"type": "object", "properties": {"label": {"type": "string"}}}))
        );
    }

    #[test]
    fn test_metadata_fields() {
        let document = pet_store();
        let endpoint = build(&document, "/pets/{petId}", "put");
        assert_eq!(endpoint.method, HttpMethod::Put);
        assert_eq!(endpoint.summary, "Replace a pet");
        assert_eq!(endpoint.operation_id.as_deref(), Some("replacePet"));
        assert_eq!(endpoint.tags, vec!["pets"]);
    }

    #[test]
    fn test_responses_are_resolved_and_kept_in_order() {
        let document = pet_store();
        let endpoint = build(&document, "/pets/{petId}", "put");

        let codes: Vec<&str> = endpoint.responses.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["200", "404", "default"]);
        assert_eq!(
            endpoint.responses["404"].to_value(),
            json!({"description": "missing"})
        );
        assert_eq!(endpoint.responses["default"].to_value(), json!("bogus"));
        assert!(endpoint.response_schema("200").is_some());
        assert!(endpoint.response_schema("404").is_none());
    }

    #[test]
    fn test_unresolved_refs_collected_from_every_source() {
        let document = pet_store();
        let endpoint = build(&document, "/pets/{petId}", "put");
        // `Owner` is missing: once via the body parameter, once via the 200 response.
        assert_eq!(
            endpoint.unresolved_refs,
            vec!["#/definitions/Owner", "#/definitions/Owner"]
        );
    }

    #[test]
    fn test_only_first_body_parameter_is_used() {
        let document = json!({
            "swagger": "2.0",
            "paths": {
                "/upload": {
                    "post": {
                        "parameters": [
                            {"name": "first", "in": "body", "schema": {"type": "string"}},
                            {"name": "second", "in": "body", "schema": {"type": "integer"}}
                        ]
                    }
                }
            }
        });
        let endpoint = build(&document, "/upload", "post");
        let body = endpoint.request_body.unwrap();
        assert_eq!(body.name, "first");
        assert!(!body.required);
        assert_eq!(endpoint.parameters.len(), 2);
        assert!(endpoint.responses.is_empty());
    }

    #[test]
    fn test_unnamed_body_defaults_name() {
        let document = json!({
            "swagger": "2.0",
            "paths": {
                "/raw": {"post": {"parameters": [{"in": "body"}]}}
            }
        });
        let endpoint = build(&document, "/raw", "post");
        let body = endpoint.request_body.unwrap();
        assert_eq!(body.name, "body");
        assert!(body.schema.is_none());
    }

    #[test]
    fn test_required_only_accepts_boolean_true() {
        for required in [json!("true"), json!(1), json!(false), json!(null)] {
            let document = json!({
                "swagger": "2.0",
                "paths": {
                    "/raw": {"post": {"parameters": [{"in": "body", "required": required.clone()}]}}
                }
            });
            let endpoint = build(&document, "/raw", "post");
            assert!(!endpoint.request_body.unwrap().required, "{required}");
        }
    }
}
