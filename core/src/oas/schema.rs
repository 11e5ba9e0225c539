#![deny(missing_docs)]

//! # Schema Nodes
//!
//! The resolved form of a Swagger schema.
//!
//! A `SchemaNode` mirrors a JSON value, with two extra variants standing in
//! for references that were not expanded:
//!
//! - `Circular`: expansion would re-enter a reference already being expanded
//!   on the current descent.
//! - `Unresolved`: the reference does not map to any entry in `definitions`.
//!
//! Both markers keep the (resolved) sibling keys that accompanied the `$ref`.
//! When serialized they become ordinary objects carrying an `x-circular_ref` /
//! `x-unresolved_ref` vendor-extension key, which is the shape downstream
//! tooling consumes.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value};

/// Ordered field map of a schema object.
pub type SchemaMap = IndexMap<String, SchemaNode>;

/// Serialized key carrying the reference of a circular marker.
pub const CIRCULAR_REF_KEY: &str = "x-circular_ref";

/// Serialized key carrying the reference of an unresolved marker.
pub const UNRESOLVED_REF_KEY: &str = "x-unresolved_ref";

/// A JSON value with `$ref` pointers either inlined or replaced by markers.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<SchemaNode>),
    /// JSON object without a pending reference.
    Object(SchemaMap),
    /// A reference that would re-enter the current expansion path.
    Circular {
        /// The original `$ref` string.
        reference: String,
        /// Sibling keys of the `$ref`, with `type` defaulted to `object`.
        fields: SchemaMap,
    },
    /// A reference with no matching definition.
    Unresolved {
        /// The original `$ref` value.
        reference: String,
        /// Sibling keys of the `$ref`.
        fields: SchemaMap,
    },
}

impl SchemaNode {
    /// Converts a JSON value as-is, without looking at `$ref` keys.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from_value).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    /// Renders the node back into plain JSON, markers included.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::Object(fields) => Value::Object(fields_to_map(fields, None)),
            Self::Circular { reference, fields } => {
                marker_to_value(fields, CIRCULAR_REF_KEY, reference)
            }
            Self::Unresolved { reference, fields } => {
                marker_to_value(fields, UNRESOLVED_REF_KEY, reference)
            }
        }
    }

    /// Field map of an object or marker node.
    pub fn fields(&self) -> Option<&SchemaMap> {
        match self {
            Self::Object(fields)
            | Self::Circular { fields, .. }
            | Self::Unresolved { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Looks up a field of an object or marker node.
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.fields()?.get(key)
    }

    /// Returns the string payload of a `String` node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the reference carried by a circular marker.
    pub fn circular_ref(&self) -> Option<&str> {
        match self {
            Self::Circular { reference, .. } => Some(reference),
            _ => None,
        }
    }

    /// Returns the reference carried by an unresolved marker.
    pub fn unresolved_ref(&self) -> Option<&str> {
        match self {
            Self::Unresolved { reference, .. } => Some(reference),
            _ => None,
        }
    }

    /// Appends every unresolved reference in this subtree to `out`
    /// (depth-first, pre-order).
    pub fn collect_unresolved(&self, out: &mut Vec<String>) {
        match self {
            Self::Unresolved { reference, fields } => {
                out.push(reference.clone());
                for child in fields.values() {
                    child.collect_unresolved(out);
                }
            }
            Self::Object(fields) | Self::Circular { fields, .. } => {
                for child in fields.values() {
                    child.collect_unresolved(out);
                }
            }
            Self::Array(items) => {
                for child in items {
                    child.collect_unresolved(out);
                }
            }
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => {}
        }
    }

    /// Collects every unresolved reference in this subtree.
    pub fn unresolved_refs(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_unresolved(&mut out);
        out
    }
}

impl From<&Value> for SchemaNode {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

fn fields_to_map(fields: &SchemaMap, skip: Option<&str>) -> Map<String, Value> {
    fields
        .iter()
        .filter(|(key, _)| Some(key.as_str()) != skip)
        .map(|(key, node)| (key.clone(), node.to_value()))
        .collect()
}

fn marker_to_value(fields: &SchemaMap, marker_key: &str, reference: &str) -> Value {
    let mut map = fields_to_map(fields, Some(marker_key));
    map.insert(marker_key.to_string(), Value::String(reference.to_string()));
    Value::Object(map)
}

fn serialize_marker<S: Serializer>(
    serializer: S,
    fields: &SchemaMap,
    marker_key: &str,
    reference: &str,
) -> Result<S::Ok, S::Error> {
    // A sibling literally named like the marker key is shadowed by the marker.
    let shadowed = usize::from(fields.contains_key(marker_key));
    let mut map = serializer.serialize_map(Some(fields.len() + 1 - shadowed))?;
    for (key, node) in fields.iter().filter(|(key, _)| key.as_str() != marker_key) {
        map.serialize_entry(key, node)?;
    }
    map.serialize_entry(marker_key, reference)?;
    map.end()
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, node) in fields {
                    map.serialize_entry(key, node)?;
                }
                map.end()
            }
            Self::Circular { reference, fields } => {
                serialize_marker(serializer, fields, CIRCULAR_REF_KEY, reference)
            }
            Self::Unresolved { reference, fields } => {
                serialize_marker(serializer, fields, UNRESOLVED_REF_KEY, reference)
            }
        }
    }
}
