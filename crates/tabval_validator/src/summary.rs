//! Result summarization for the privacy-preserving execution path.
//!
//! The federated entrypoint receives an already-materialized table and
//! returns only coarse, non-identifying results. Any fault anywhere in
//! model resolution or validation is caught at this boundary and reduced
//! to a generic failure marker; no fault detail, row content, or error
//! text ever crosses it.

use tabval_core::{ValidationOutcome, ValidationSummary};

use crate::{ModelRegistry, RowBatch, ValidateError, engine};

/// Reduces a completed run to its disclosure-safe summary.
pub fn summarize(outcome: &ValidationOutcome) -> ValidationSummary {
    ValidationSummary::from_counts(outcome.rows_examined, outcome.errors.len() as u64)
}

/// Federated-compute entrypoint.
///
/// Validates `batch` against `model_name` (falling back to
/// `default_model`) and returns the reduced summary. This function never
/// fails: faults degrade to a summary with `validation_passed: false` and
/// a generic error marker, keeping a best-effort row count only.
pub fn validate_data(
    batch: &RowBatch,
    registry: &ModelRegistry,
    model_name: Option<&str>,
    default_model: &str,
) -> ValidationSummary {
    let target = model_name.unwrap_or(default_model);
    match run(batch, registry, target) {
        Ok(outcome) => summarize(&outcome),
        Err(_) => ValidationSummary::degraded(batch.len() as u64),
    }
}

fn run(
    batch: &RowBatch,
    registry: &ModelRegistry,
    name: &str,
) -> Result<ValidationOutcome, ValidateError> {
    let model = registry.get(name)?;
    engine::validate(batch, &model, 0)
}
