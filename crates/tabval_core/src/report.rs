//! Validation report records.
//!
//! Content faults are never raised as errors; they are collected as
//! [`ValidationError`] records and returned to the caller. Everything in
//! this module is immutable once created and serializable.

use serde::{Deserialize, Serialize};

/// Generic failure marker returned across the privacy-preserving boundary.
///
/// Deliberately carries no fault detail, row content, or stack information.
pub const DISCLOSURE_SAFE_FAILURE: &str = "Validation failed; see server logs for details.";

/// The kind of a single schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Required field is absent or empty
    MissingRequired,
    /// Cell could not be interpreted as the declared type
    TypeMismatch,
    /// Numeric value outside the declared bounds
    OutOfRange,
    /// Raw value does not match the declared regex
    PatternMismatch,
    /// Raw value not in the declared allowed set
    NotInAllowedSet,
}

/// One schema violation on one cell.
///
/// `row_index` is global and 0-based: a row's absolute position in the
/// whole input, independent of how the input was chunked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Absolute row position in the whole input
    pub row_index: u64,

    /// Column the violation was found in
    pub column: String,

    /// Violation kind
    pub kind: ErrorKind,

    /// Human-readable description
    pub message: String,

    /// The offending raw cell content, when one exists
    pub raw_value: Option<String>,
}

impl ValidationError {
    /// A required field was absent or empty.
    pub fn missing_required(row_index: u64, column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            row_index,
            message: format!("Required field '{column}' is missing or empty"),
            column,
            kind: ErrorKind::MissingRequired,
            raw_value: None,
        }
    }

    /// A cell could not be interpreted as the declared type.
    pub fn type_mismatch(
        row_index: u64,
        column: impl Into<String>,
        expected: &str,
        raw: impl Into<String>,
    ) -> Self {
        let raw = raw.into();
        Self {
            row_index,
            column: column.into(),
            kind: ErrorKind::TypeMismatch,
            message: format!("Value '{raw}' is not a valid {expected}"),
            raw_value: Some(raw),
        }
    }

    /// A numeric value fell outside the declared bounds.
    pub fn out_of_range(
        row_index: u64,
        column: impl Into<String>,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
        raw: impl Into<String>,
    ) -> Self {
        let low = min.map_or("-inf".to_string(), |m| m.to_string());
        let high = max.map_or("inf".to_string(), |m| m.to_string());
        Self {
            row_index,
            column: column.into(),
            kind: ErrorKind::OutOfRange,
            message: format!("Value {value} out of range [{low}, {high}]"),
            raw_value: Some(raw.into()),
        }
    }

    /// A raw value failed its regex pattern.
    pub fn pattern_mismatch(
        row_index: u64,
        column: impl Into<String>,
        pattern: &str,
        raw: impl Into<String>,
    ) -> Self {
        let raw = raw.into();
        Self {
            row_index,
            column: column.into(),
            kind: ErrorKind::PatternMismatch,
            message: format!("Value '{raw}' does not match pattern '{pattern}'"),
            raw_value: Some(raw),
        }
    }

    /// A raw value was outside the allowed set.
    pub fn not_in_allowed_set(
        row_index: u64,
        column: impl Into<String>,
        allowed: &[String],
        raw: impl Into<String>,
    ) -> Self {
        let raw = raw.into();
        Self {
            row_index,
            column: column.into(),
            kind: ErrorKind::NotInAllowedSet,
            message: format!("Value '{raw}' not in allowed values: [{}]", allowed.join(", ")),
            raw_value: Some(raw),
        }
    }
}

/// The result of one engine invocation over one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Violations in row-then-column order
    pub errors: Vec<ValidationError>,

    /// Number of rows the engine examined
    pub rows_examined: u64,

    /// True only when the error cap was hit inside this chunk
    pub truncated: bool,
}

impl ValidationOutcome {
    /// An outcome with no violations.
    pub fn clean(rows_examined: u64) -> Self {
        Self {
            errors: Vec::new(),
            rows_examined,
            truncated: false,
        }
    }

    /// Cuts the error list down to `cap` entries and marks the outcome
    /// truncated if anything was dropped.
    pub fn truncate_to(&mut self, cap: usize) {
        if self.errors.len() > cap {
            self.errors.truncate(cap);
            self.truncated = true;
        }
    }
}

/// The synthetic error-shaped terminal record appended when a stream fault
/// occurs after processing has already begun.
///
/// Not attributable to any specific row; it closes the emitted sequence in
/// a structurally valid form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamFault {
    /// Short failure category
    pub error: String,

    /// Failure detail
    pub detail: String,
}

impl StreamFault {
    /// The terminal record for a fault that interrupted an in-progress run.
    pub fn mid_stream(detail: impl Into<String>) -> Self {
        Self {
            error: "Validation stream failed".to_string(),
            detail: detail.into(),
        }
    }
}

/// One element of the emitted validation sequence.
///
/// Serializes untagged: a [`ValidationError`] element keeps its record
/// shape and a [`StreamFault`] serializes to `{"error": ..., "detail": ...}`,
/// so a serialized sequence is a homogeneous JSON array of objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StreamItem {
    /// A per-row schema violation
    Error(ValidationError),
    /// The terminal failure marker
    Fault(StreamFault),
}

/// Disclosure-minimized summary for the privacy-preserving execution path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Rows seen by the run (best-effort on failure)
    pub total_rows: u64,

    /// Total violations, absent when the run itself failed
    pub total_errors: Option<u64>,

    /// `total_errors / total_rows`, 0 for an empty input, absent on failure
    pub error_rate_per_row: Option<f64>,

    /// True iff the run completed and found no violations
    pub validation_passed: bool,

    /// Generic non-identifying failure marker, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationSummary {
    /// Summary of a completed run.
    pub fn from_counts(total_rows: u64, total_errors: u64) -> Self {
        let error_rate_per_row = if total_rows == 0 {
            0.0
        } else {
            total_errors as f64 / total_rows as f64
        };
        Self {
            total_rows,
            total_errors: Some(total_errors),
            error_rate_per_row: Some(error_rate_per_row),
            validation_passed: total_errors == 0,
            error: None,
        }
    }

    /// Summary of a run that failed before completing.
    ///
    /// Only the best-effort row count survives; no underlying fault detail
    /// crosses this boundary.
    pub fn degraded(total_rows: u64) -> Self {
        Self {
            total_rows,
            total_errors: None,
            error_rate_per_row: None,
            validation_passed: false,
            error: Some(DISCLOSURE_SAFE_FAILURE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_kind_serializes_kebab_case() {
        let kinds = [
            (ErrorKind::MissingRequired, "\"missing-required\""),
            (ErrorKind::TypeMismatch, "\"type-mismatch\""),
            (ErrorKind::OutOfRange, "\"out-of-range\""),
            (ErrorKind::PatternMismatch, "\"pattern-mismatch\""),
            (ErrorKind::NotInAllowedSet, "\"not-in-allowed-set\""),
        ];
        for (kind, expected) in kinds {
            assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        }
    }

    #[test]
    fn test_validation_error_json_shape() {
        let err = ValidationError::type_mismatch(3, "age", "integer", "abc");
        let value: serde_json::Value = serde_json::to_value(&err).unwrap();

        assert_eq!(value["row_index"], 3);
        assert_eq!(value["column"], "age");
        assert_eq!(value["kind"], "type-mismatch");
        assert_eq!(value["raw_value"], "abc");
    }

    #[test]
    fn test_stream_item_untagged_serialization() {
        let fault = StreamItem::Fault(StreamFault::mid_stream("broken row"));
        let value: serde_json::Value = serde_json::to_value(&fault).unwrap();
        assert_eq!(value["error"], "Validation stream failed");
        assert_eq!(value["detail"], "broken row");

        let err = StreamItem::Error(ValidationError::missing_required(0, "id"));
        let value: serde_json::Value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["kind"], "missing-required");
    }

    #[test]
    fn test_outcome_truncate_to() {
        let mut outcome = ValidationOutcome {
            errors: vec![
                ValidationError::missing_required(0, "id"),
                ValidationError::missing_required(1, "id"),
                ValidationError::missing_required(2, "id"),
            ],
            rows_examined: 3,
            truncated: false,
        };

        outcome.truncate_to(5);
        assert_eq!(outcome.errors.len(), 3);
        assert!(!outcome.truncated);

        outcome.truncate_to(2);
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.truncated);
    }

    #[test]
    fn test_summary_from_counts() {
        let summary = ValidationSummary::from_counts(10, 5);
        assert_eq!(summary.total_errors, Some(5));
        assert_eq!(summary.error_rate_per_row, Some(0.5));
        assert!(!summary.validation_passed);

        let clean = ValidationSummary::from_counts(10, 0);
        assert!(clean.validation_passed);
        assert_eq!(clean.error_rate_per_row, Some(0.0));
    }

    #[test]
    fn test_summary_empty_input_rate_is_zero() {
        let summary = ValidationSummary::from_counts(0, 0);
        assert_eq!(summary.error_rate_per_row, Some(0.0));
        assert!(summary.validation_passed);
    }

    #[test]
    fn test_degraded_summary_hides_detail() {
        let summary = ValidationSummary::degraded(42);
        assert_eq!(summary.total_rows, 42);
        assert_eq!(summary.total_errors, None);
        assert_eq!(summary.error_rate_per_row, None);
        assert!(!summary.validation_passed);
        assert_eq!(summary.error.as_deref(), Some(DISCLOSURE_SAFE_FAILURE));
    }

    #[test]
    fn test_degraded_summary_serializes_error_field() {
        let ok: serde_json::Value =
            serde_json::to_value(ValidationSummary::from_counts(1, 0)).unwrap();
        assert!(ok.get("error").is_none());

        let bad: serde_json::Value =
            serde_json::to_value(ValidationSummary::degraded(1)).unwrap();
        assert!(bad.get("error").is_some());
    }
}
