#![deny(missing_docs)]

//! # Resolver Module
//!
//! Inlines `#/definitions/...` references of a Swagger 2.0 document.
//!
//! Handles:
//! - Recursive walk over arrays and objects.
//! - Local overrides: keys next to a `$ref` win over the definition's own keys.
//! - Cycles, detected per descent path via `RefPath`, become `SchemaNode::Circular`.
//! - Unknown references become `SchemaNode::Unresolved`.
//!
//! The walk never fails on bad references. The one error is the depth guard.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::parse_definition_ref;
use crate::oas::schema::{SchemaMap, SchemaNode};
use serde_json::{Map, Value};

/// Default upper bound on nesting plus reference expansion depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

const REF_KEY: &str = "$ref";

/// The references currently being expanded, from the root of the walk down.
///
/// Each step borrows its parent, so extending a path never touches the
/// caller's copy and sibling branches cannot see each other's entries.
#[derive(Debug, Clone, Copy)]
pub enum RefPath<'a> {
    /// Nothing expanded yet.
    Root,
    /// `reference` is being expanded below `parent`.
    Step {
        /// The reference string being expanded.
        reference: &'a str,
        /// The path leading to this expansion.
        parent: &'a RefPath<'a>,
    },
}

impl<'a> RefPath<'a> {
    /// An empty path.
    pub const fn root() -> Self {
        RefPath::Root
    }

    /// Returns a new path with `reference` appended.
    pub fn extend<'b>(&'b self, reference: &'b str) -> RefPath<'b>
    where
        'a: 'b,
    {
        RefPath::Step {
            reference,
            parent: self,
        }
    }

    /// Whether `reference` is already being expanded on this path.
    pub fn contains(&self, reference: &str) -> bool {
        let mut cursor = self;
        while let RefPath::Step {
            reference: current,
            parent,
        } = cursor
        {
            if *current == reference {
                return true;
            }
            cursor = *parent;
        }
        false
    }

    /// Number of references on the path.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut cursor = self;
        while let RefPath::Step { parent, .. } = cursor {
            count += 1;
            cursor = *parent;
        }
        count
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, RefPath::Root)
    }

    /// References on the path in expansion order (outermost first).
    pub fn references(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut cursor = self;
        while let RefPath::Step { reference, parent } = cursor {
            out.push(*reference);
            cursor = *parent;
        }
        out.reverse();
        out
    }
}

impl Default for RefPath<'_> {
    fn default() -> Self {
        Self::root()
    }
}

/// Resolves schema nodes against one document's `definitions`.
///
/// The resolver only reads the document. Every call returns a freshly
/// allocated tree, so one resolver can serve any number of schema roots.
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'doc> {
    definitions: Option<&'doc Map<String, Value>>,
    max_depth: usize,
}

impl<'doc> SchemaResolver<'doc> {
    /// Creates a resolver over `document` with the default depth limit.
    pub fn new(document: &'doc Value) -> Self {
        Self {
            definitions: document.get("definitions").and_then(Value::as_object),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolves `node` starting from an empty reference path.
    pub fn resolve(&self, node: &Value) -> AppResult<SchemaNode> {
        self.resolve_with_path(node, &RefPath::root())
    }

    /// Resolves `node` as if the references in `path` were already being expanded.
    pub fn resolve_with_path(&self, node: &Value, path: &RefPath<'_>) -> AppResult<SchemaNode> {
        self.resolve_node(node, path, 0)
    }

    fn check_depth(&self, depth: usize) -> AppResult<()> {
        if depth > self.max_depth {
            return Err(AppError::SchemaTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn resolve_node(
        &self,
        node: &Value,
        path: &RefPath<'_>,
        depth: usize,
    ) -> AppResult<SchemaNode> {
        self.check_depth(depth)?;
        match node {
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_node(item, path, depth + 1))
                .collect::<AppResult<Vec<_>>>()
                .map(SchemaNode::Array),
            Value::Object(map) => self.resolve_object(map, path, depth),
            scalar => Ok(SchemaNode::from_value(scalar)),
        }
    }

    fn resolve_object(
        &self,
        map: &Map<String, Value>,
        path: &RefPath<'_>,
        depth: usize,
    ) -> AppResult<SchemaNode> {
        self.check_depth(depth)?;
        let Some(ref_value) = map.get(REF_KEY) else {
            return self.resolve_fields(map, path, depth).map(SchemaNode::Object);
        };

        let Some(reference) = ref_value.as_str() else {
            return Ok(SchemaNode::Unresolved {
                reference: ref_value.to_string(),
                fields: self.resolve_fields(map, path, depth)?,
            });
        };

        if path.contains(reference) {
            let mut fields = self.resolve_fields(map, path, depth)?;
            if !fields.contains_key("type") {
                fields.insert("type".to_string(), SchemaNode::String("object".to_string()));
            }
            return Ok(SchemaNode::Circular {
                reference: reference.to_string(),
                fields,
            });
        }

        let Some(target) = self.lookup(reference) else {
            tracing::trace!(reference, "reference has no matching definition");
            return Ok(SchemaNode::Unresolved {
                reference: reference.to_string(),
                fields: self.resolve_fields(map, path, depth)?,
            });
        };

        let mut merged = target.clone();
        for (key, value) in map.iter().filter(|(key, _)| key.as_str() != REF_KEY) {
            merged.insert(key.clone(), value.clone());
        }

        let next = path.extend(reference);
        self.resolve_object(&merged, &next, depth + 1)
    }

    /// Resolves every key except `$ref`, keeping the source order.
    fn resolve_fields(
        &self,
        map: &Map<String, Value>,
        path: &RefPath<'_>,
        depth: usize,
    ) -> AppResult<SchemaMap> {
        map.iter()
            .filter(|(key, _)| key.as_str() != REF_KEY)
            .map(|(key, value)| {
                self.resolve_node(value, path, depth + 1)
                    .map(|node| (key.clone(), node))
            })
            .collect()
    }

    /// Finds the object definition a reference points at.
    fn lookup(&self, reference: &str) -> Option<&'doc Map<String, Value>> {
        let name = parse_definition_ref(reference)?;
        self.definitions?.get(&name)?.as_object()
    }
}

/// Resolves a single schema root against `document` with the default depth limit.
pub fn resolve_schema(node: &Value, document: &Value) -> AppResult<SchemaNode> {
    SchemaResolver::new(document).resolve(node)
}
