//! Error types for validation operations.
//!
//! These cover structural and stream faults only. Schema violations found
//! in the data are never raised; they are returned as
//! [`tabval_core::ValidationError`] records.

use thiserror::Error;

use tabval_core::ModelError;

/// Faults that can occur while setting up or driving a validation run.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The CSV source could not be parsed
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Requested model is absent from the registry
    #[error("Unknown data model: {0}")]
    UnknownModel(String),

    /// Two models share a name in the registry
    #[error("Duplicate data model definition: {0}")]
    DuplicateModel(String),

    /// A pattern constraint failed to compile
    #[error("Invalid pattern for field '{field}': {error}")]
    InvalidPattern {
        /// Field carrying the pattern
        field: String,
        /// Compiler diagnostic
        error: String,
    },

    /// A model definition is structurally broken
    #[error(transparent)]
    Model(#[from] ModelError),
}
