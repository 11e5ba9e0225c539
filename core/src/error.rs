//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only document-level problems are errors. A reference that cannot be
//! resolved is recorded inline in the resolved tree instead.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Message-carrying variants opt out of `From` so they are always built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input could not be parsed as JSON.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// The input could not be parsed as YAML.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// The document violates a document-level precondition (e.g. wrong `swagger` version).
    #[from(ignore)]
    #[display("Value Format Error: {_0}")]
    ValueFormat(String),

    /// Resolution descended past the configured depth limit.
    #[from(ignore)]
    #[display("Schema Too Deep: nesting exceeds the limit of {limit} levels")]
    SchemaTooDeep {
        /// The configured maximum depth.
        limit: usize,
    },
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
