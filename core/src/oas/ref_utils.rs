#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for mapping Swagger 2.0 `$ref` strings onto the document's
//! `definitions` section.
//!
//! Only local references of the form `#/definitions/<name>` are recognised.
//! Anything else (remote documents, OAS 3 `components`, other sections) is
//! reported as unmappable and left for the caller to mark as unresolved.

use percent_encoding::percent_decode_str;

/// Prefix every resolvable Swagger 2.0 schema reference starts with.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Extracts the definition name from a `#/definitions/<name>` reference.
///
/// The name is everything after the prefix, JSON Pointer decoded.
/// Returns `None` when the prefix does not match or the name is empty.
pub fn parse_definition_ref(ref_str: &str) -> Option<String> {
    let raw = ref_str.strip_prefix(DEFINITIONS_PREFIX)?;
    let name = decode_pointer_segment(raw);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
