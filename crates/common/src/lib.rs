//! Shared content-model types for strapi-ts.
//!
//! This crate holds the parsed form of a content-type or component definition
//! document. It is used by both the generation engine (`strapi-ts-core`) and
//! the command line front end (`strapi-ts-cli`), which loads records from disk.

pub mod model;

pub use model::{
    Attributes, FieldKind, FieldSpec, ModelInfo, ModelOptions, RawModelRecord, RelationKind,
};

/// Failure to turn a definition document into a [`RawModelRecord`].
#[derive(Debug, thiserror::Error)]
pub enum ModelParseError {
    /// The document is not valid JSON, or a known key has the wrong shape.
    #[error("failed to parse model definition {path}: {source}")]
    Json {
        /// Source path of the offending document.
        path: String,
        /// Underlying parser error.
        source: serde_json::Error,
    },
}
