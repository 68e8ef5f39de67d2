//! Fatal generation errors.

use strapi_ts_common::ModelParseError;

/// Fatal failures of a generation run.
///
/// Anything recoverable (unknown references, duplicate keys) is reported as a
/// [`crate::Diagnostic`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source path of a record does not yield a model key.
    #[error("cannot derive a model key from source path '{path}'")]
    UndefinedModelKey {
        /// Source path of the record
        path: String,
    },

    /// A definition document could not be parsed.
    #[error(transparent)]
    Parse(#[from] ModelParseError),
}

/// Result with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
