#![deny(missing_docs)]

//! # Parameter Merging
//!
//! Combines path-level and operation-level parameter lists.
//!
//! Parameters are identified by their (`name`, `in`) pair. An operation-level
//! parameter replaces a path-level one with the same key, but keeps the
//! position the key was first seen at.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Identity of a parameter within one operation.
pub type ParameterKey = (String, String);

/// Builds the effective parameter set of an operation.
///
/// Entries that are not JSON objects are dropped. Returned parameters are
/// deep copies of the document's entries.
pub fn merge_parameters(path_params: &[Value], op_params: &[Value]) -> Vec<Map<String, Value>> {
    let mut merged: IndexMap<ParameterKey, Map<String, Value>> = IndexMap::new();

    for param in path_params.iter().filter_map(Value::as_object) {
        if let Entry::Vacant(slot) = merged.entry(parameter_key(param)) {
            slot.insert(param.clone());
        }
    }

    for param in op_params.iter().filter_map(Value::as_object) {
        // Overwriting an existing key keeps its original position.
        merged.insert(parameter_key(param), param.clone());
    }

    merged.into_values().collect()
}

/// Computes the (`name`, `in`) key of a parameter object.
pub fn parameter_key(param: &Map<String, Value>) -> ParameterKey {
    (key_part(param.get("name")), key_part(param.get("in")))
}

fn key_part(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
