//! Property-based tests for the resolver and parameter merge.
//!
//! Documents are generated with random reference graphs between a handful of
//! definitions, some of which point at names that do not exist.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use swagger2_core::oas::routes::params::parameter_key;
use swagger2_core::{merge_parameters, resolve_schema, SchemaNode};

const NAME_POOL: usize = 8;

fn def_name(index: usize) -> String {
    format!("D{}", index)
}

fn def_ref(index: usize) -> String {
    format!("#/definitions/{}", def_name(index))
}

/// Definition `i` refers to each index in `edges[i]`; indices past the end are missing.
///
/// Every definition carries an `x-def` tag with its own name so expansions can be traced.
fn build_document(edges: &[Vec<(usize, bool)>]) -> Value {
    let mut definitions = Map::new();
    for (i, targets) in edges.iter().enumerate() {
        let mut properties = Map::new();
        for (j, (target, as_array)) in targets.iter().enumerate() {
            let reference = json!({"$ref": def_ref(*target)});
            let property = if *as_array {
                json!({"type": "array", "items": reference})
            } else {
                reference
            };
            properties.insert(format!("p{}", j), property);
        }
        definitions.insert(
            def_name(i),
            json!({"type": "object", "x-def": def_name(i), "properties": properties}),
        );
    }
    json!({"swagger": "2.0", "definitions": definitions, "paths": {}})
}

fn graph_strategy() -> impl Strategy<Value = Vec<Vec<(usize, bool)>>> {
    prop::collection::vec(
        prop::collection::vec((0..NAME_POOL, any::<bool>()), 0..4),
        1..6,
    )
}

fn contains_ref_key(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.contains_key("$ref") || map.values().any(contains_ref_key),
        Value::Array(items) => items.iter().any(contains_ref_key),
        _ => false,
    }
}

fn circular_refs(node: &SchemaNode, out: &mut Vec<String>) {
    if let Some(reference) = node.circular_ref() {
        out.push(reference.to_string());
    }
    match node {
        SchemaNode::Array(items) => items.iter().for_each(|n| circular_refs(n, out)),
        other => {
            if let Some(fields) = other.fields() {
                fields.values().for_each(|n| circular_refs(n, out));
            }
        }
    }
}

/// Walks the tree with the chain of expanded definitions above each node.
///
/// A definition never expands twice on one chain, and a circular marker only
/// ever names a definition that is already on its chain.
fn check_reentry(node: &SchemaNode, chain: &mut Vec<String>) -> Result<(), TestCaseError> {
    if let Some(reference) = node.circular_ref() {
        let name = reference.trim_start_matches("#/definitions/");
        prop_assert!(
            chain.iter().any(|d| d == name),
            "{} is not on the chain {:?}",
            reference,
            chain
        );
        return Ok(());
    }

    let tag = match node {
        SchemaNode::Object(_) => node.get("x-def").and_then(SchemaNode::as_str),
        _ => None,
    };
    if let Some(tag) = tag {
        prop_assert!(!chain.iter().any(|d| d == tag), "{} expanded twice", tag);
        chain.push(tag.to_string());
    }

    match node {
        SchemaNode::Array(items) => {
            for item in items {
                check_reentry(item, chain)?;
            }
        }
        other => {
            if let Some(fields) = other.fields() {
                for child in fields.values() {
                    check_reentry(child, chain)?;
                }
            }
        }
    }

    if tag.is_some() {
        chain.pop();
    }
    Ok(())
}

proptest! {
    #[test]
    fn resolution_terminates_without_dangling_refs(edges in graph_strategy()) {
        let document = build_document(&edges);
        let resolved = resolve_schema(&json!({"$ref": def_ref(0)}), &document).unwrap();
        prop_assert!(!contains_ref_key(&resolved.to_value()));
    }

    #[test]
    fn resolution_is_idempotent(edges in graph_strategy()) {
        let document = build_document(&edges);
        let first = resolve_schema(&json!({"$ref": def_ref(0)}), &document).unwrap().to_value();
        let second = resolve_schema(&first, &document).unwrap().to_value();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn markers_point_at_the_right_kind_of_name(edges in graph_strategy()) {
        let document = build_document(&edges);
        let defined = edges.len();
        let resolved = resolve_schema(&json!({"$ref": def_ref(0)}), &document).unwrap();

        let existing: HashSet<String> = (0..defined).map(def_ref).collect();
        for reference in resolved.unresolved_refs() {
            prop_assert!(!existing.contains(&reference), "{} exists", reference);
        }

        let mut circular = Vec::new();
        circular_refs(&resolved, &mut circular);
        for reference in circular {
            prop_assert!(existing.contains(&reference), "{} is missing", reference);
        }
    }

    #[test]
    fn circular_markers_only_close_cycles_on_their_own_chain(edges in graph_strategy()) {
        let document = build_document(&edges);
        let resolved = resolve_schema(&json!({"$ref": def_ref(0)}), &document).unwrap();
        check_reentry(&resolved, &mut Vec::new())?;
    }

    #[test]
    fn merged_parameters_are_unique_and_operation_wins(
        path_entries in prop::collection::vec((0..3usize, 0..2usize), 0..6),
        op_entries in prop::collection::vec((0..3usize, 0..2usize), 0..6),
    ) {
        let locations = ["query", "header"];
        let to_params = |entries: &[(usize, usize)], origin: &str| -> Vec<Value> {
            entries
                .iter()
                .enumerate()
                .map(|(seq, (name, loc))| json!({
                    "name": format!("n{}", name),
                    "in": locations[*loc],
                    "origin": origin,
                    "seq": seq
                }))
                .collect()
        };
        let path_params = to_params(path_entries.as_slice(), "path");
        let op_params = to_params(op_entries.as_slice(), "operation");

        let merged = merge_parameters(&path_params, &op_params);

        let keys: Vec<_> = merged.iter().map(parameter_key).collect();
        let unique: HashSet<_> = keys.iter().cloned().collect();
        prop_assert_eq!(keys.len(), unique.len());

        let op_keys: HashSet<_> = op_params
            .iter()
            .filter_map(Value::as_object)
            .map(parameter_key)
            .collect();
        for param in &merged {
            let key = parameter_key(param);
            let expected_origin = if op_keys.contains(&key) { "operation" } else { "path" };
            prop_assert_eq!(param["origin"].as_str(), Some(expected_origin));
        }
    }
}
