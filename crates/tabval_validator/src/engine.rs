//! The validation engine.
//!
//! [`validate`] applies one data model to one in-memory chunk of raw rows
//! and returns every schema violation it finds as data. It never fails for
//! data content, performs no I/O, and holds no state between invocations;
//! validating a row depends on nothing but that row, so an input split
//! into chunks of any size produces the same violations with the same
//! global row indices.

use chrono::NaiveDate;

use tabval_core::{DataModel, FieldType, ValidationError, ValidationOutcome};

use crate::constraints::{FieldPlan, check_constraints};
use crate::{RowBatch, ValidateError};

/// Validates one chunk of rows against a model.
///
/// `row_index_offset` is the global index of the batch's first row; every
/// reported `row_index` is global, independent of how the caller chunked
/// the input.
///
/// Per row, fields are checked in model order:
///
/// 1. an absent or empty cell on a required field yields
///    `missing-required` and ends that field's checks;
/// 2. a cell that cannot be interpreted as the declared type yields
///    `type-mismatch` and skips constraints;
/// 3. constraints run in bounds → pattern → allowed-set order, reporting
///    only the first violation.
///
/// The only `Err` this returns is a structural model fault (a pattern that
/// fails to compile); content problems are entries in the outcome.
///
/// # Example
///
/// ```rust
/// use tabval_core::{FieldSpecBuilder, FieldType, ModelBuilder};
/// use tabval_validator::{RowBatch, validate};
///
/// let model = ModelBuilder::new("patients")
///     .field(
///         FieldSpecBuilder::new("age", FieldType::Integer)
///             .required()
///             .min(0.0)
///             .max(120.0)
///             .build(),
///     )
///     .build();
///
/// let batch = RowBatch::from_rows(vec!["age".into()], vec![vec!["200".into()]]);
/// let outcome = validate(&batch, &model, 0).unwrap();
///
/// assert_eq!(outcome.errors.len(), 1);
/// assert_eq!(outcome.errors[0].row_index, 0);
/// ```
pub fn validate(
    batch: &RowBatch,
    model: &DataModel,
    row_index_offset: u64,
) -> Result<ValidationOutcome, ValidateError> {
    let plans = FieldPlan::build(model, batch)?;

    let mut errors = Vec::new();
    for (local, row) in batch.rows().enumerate() {
        let row_index = row_index_offset + local as u64;
        for plan in &plans {
            if let Some(err) = check_field(plan, row, row_index) {
                errors.push(err);
            }
        }
    }

    Ok(ValidationOutcome {
        errors,
        rows_examined: batch.len() as u64,
        truncated: false,
    })
}

fn check_field(plan: &FieldPlan<'_>, row: &[String], row_index: u64) -> Option<ValidationError> {
    let spec = plan.spec;

    let raw = plan
        .column
        .and_then(|i| row.get(i))
        .map(|cell| cell.trim());
    let raw = match raw {
        None | Some("") => {
            if spec.required {
                return Some(ValidationError::missing_required(row_index, &spec.name));
            }
            return None;
        }
        Some(value) => value,
    };

    let numeric = match interpret(&spec.field_type, raw) {
        Ok(numeric) => numeric,
        Err(expected) => {
            return Some(ValidationError::type_mismatch(
                row_index, &spec.name, expected, raw,
            ));
        }
    };

    check_constraints(plan, raw, numeric, row_index)
}

/// Attempts to read a raw cell as the declared type.
///
/// Returns the numeric value for bounds checking where one exists, or the
/// expected type name on failure.
fn interpret(field_type: &FieldType, raw: &str) -> Result<Option<f64>, &'static str> {
    match field_type {
        FieldType::String | FieldType::Enum { .. } => Ok(None),
        FieldType::Integer => raw
            .parse::<i64>()
            .map(|i| Some(i as f64))
            .map_err(|_| "integer"),
        FieldType::Float => raw.parse::<f64>().map(Some).map_err(|_| "float"),
        FieldType::Date => raw.parse::<NaiveDate>().map(|_| None).map_err(|_| "date"),
    }
}
