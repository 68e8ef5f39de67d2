//! Non-fatal findings collected during a run.

use std::fmt;

use tracing::{debug, warn};

/// A recoverable problem with the input set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A field names a model that is not part of the build; its type fell back to `any`.
    UnresolvedReference {
        /// Interface holding the field
        interface: String,
        /// Field name as declared
        field: String,
        /// The model key that was looked up
        reference: String,
    },
    /// Two records derived the same model key; the later one replaced the earlier.
    DuplicateModelKey {
        /// The shared model key
        key: String,
        /// Source path of the dropped record
        previous: String,
        /// Source path of the record that was kept
        replacement: String,
        /// Both records are components, or both are not.
        same_kind: bool,
    },
}

impl Diagnostic {
    /// Emit the diagnostic through `tracing`.
    pub(crate) fn log(&self) {
        match self {
            Diagnostic::DuplicateModelKey {
                same_kind: false, ..
            } => debug!("{self}"),
            _ => warn!("{self}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedReference {
                interface,
                field,
                reference,
            } => write!(
                f,
                "type '{reference}' unknown on {interface}[{field}], falling back to 'any'. \
                 Add the folder that contains the definition of '{reference}' to the inputs"
            ),
            Diagnostic::DuplicateModelKey {
                key,
                previous,
                replacement,
                same_kind,
            } => {
                let kind = if *same_kind {
                    "same classification"
                } else {
                    "different classification"
                };
                write!(
                    f,
                    "duplicate model key '{key}' ({kind}): '{replacement}' replaces '{previous}'"
                )
            }
        }
    }
}
