//! Error types for data model definitions.
//!
//! These are structural faults: a broken model definition or an
//! out-of-set delimiter is rejected at the boundary, before any row
//! processing begins. Per-row schema violations are not errors in this
//! sense; they are [`crate::ValidationError`] records.

use thiserror::Error;

/// Faults in a model definition or a shared value type.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Model defines no fields
    #[error("Model '{0}' has no fields defined")]
    EmptyModel(String),

    /// Two fields share a name within one model
    #[error("Duplicate field name '{field}' in model '{model}'")]
    DuplicateField {
        /// Model being loaded
        model: String,
        /// Offending field name
        field: String,
    },

    /// A pattern constraint is not a valid regex
    #[error("Invalid pattern for field '{field}' in model '{model}': {error}")]
    InvalidPattern {
        /// Model being loaded
        model: String,
        /// Field carrying the pattern
        field: String,
        /// Compiler diagnostic
        error: String,
    },

    /// Delimiter outside the supported set
    #[error("Unsupported delimiter {0:?}; expected one of \",\", \";\", \"\\t\", \"|\"")]
    UnsupportedDelimiter(String),
}
