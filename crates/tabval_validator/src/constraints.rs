//! Constraint evaluation.
//!
//! Constraints run only after a cell has been interpreted as its declared
//! type, in a fixed order: numeric bounds, then pattern, then allowed-value
//! set. At most one constraint violation is reported per field per row;
//! the first violated constraint wins.

use regex::Regex;

use tabval_core::{DataModel, FieldSpec, FieldType, ValidationError};

use crate::{RowBatch, ValidateError};

/// Per-field validation plan, resolved once per engine invocation.
///
/// Binds a field rule to its column position in the batch and carries the
/// compiled pattern so the regex is built once per chunk, not once per
/// cell.
pub(crate) struct FieldPlan<'m> {
    pub spec: &'m FieldSpec,
    pub column: Option<usize>,
    pub pattern: Option<Regex>,
}

impl<'m> FieldPlan<'m> {
    /// Resolves every field of `model` against the batch's columns.
    ///
    /// Patterns are checked at model load time, so a compile failure here
    /// means the model bypassed loading; it surfaces as a fault rather
    /// than a panic.
    pub fn build(model: &'m DataModel, batch: &RowBatch) -> Result<Vec<FieldPlan<'m>>, ValidateError> {
        model
            .fields
            .iter()
            .map(|spec| {
                let pattern = spec
                    .constraints
                    .as_ref()
                    .and_then(|c| c.pattern.as_deref())
                    .map(|p| {
                        Regex::new(p).map_err(|e| ValidateError::InvalidPattern {
                            field: spec.name.clone(),
                            error: e.to_string(),
                        })
                    })
                    .transpose()?;

                Ok(FieldPlan {
                    spec,
                    column: batch.column_index(&spec.name),
                    pattern,
                })
            })
            .collect()
    }
}

/// Evaluates the constraint chain for one interpreted cell.
///
/// `numeric` carries the parsed value for integer/float fields; bounds are
/// skipped for non-numeric types. For [`FieldType::Enum`] fields the
/// variant's value set acts as an implicit trailing allowed-value
/// constraint.
pub(crate) fn check_constraints(
    plan: &FieldPlan<'_>,
    raw: &str,
    numeric: Option<f64>,
    row_index: u64,
) -> Option<ValidationError> {
    let spec = plan.spec;
    let constraints = spec.constraints.as_ref();

    if let (Some(c), Some(value)) = (constraints, numeric) {
        let below = c.min.is_some_and(|min| value < min);
        let above = c.max.is_some_and(|max| value > max);
        if below || above {
            return Some(ValidationError::out_of_range(
                row_index, &spec.name, value, c.min, c.max, raw,
            ));
        }
    }

    if let Some(re) = &plan.pattern {
        if !re.is_match(raw) {
            return Some(ValidationError::pattern_mismatch(
                row_index,
                &spec.name,
                re.as_str(),
                raw,
            ));
        }
    }

    if let Some(allowed) = constraints.and_then(|c| c.allowed_values.as_ref()) {
        if !allowed.iter().any(|a| a == raw) {
            return Some(ValidationError::not_in_allowed_set(
                row_index, &spec.name, allowed, raw,
            ));
        }
    }

    if let FieldType::Enum { values } = &spec.field_type {
        if !values.iter().any(|v| v == raw) {
            return Some(ValidationError::not_in_allowed_set(
                row_index, &spec.name, values, raw,
            ));
        }
    }

    None
}
