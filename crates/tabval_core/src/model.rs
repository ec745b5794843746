//! Data model types and structures.
//!
//! A data model is a named, ordered set of column rules that a tabular
//! dataset must satisfy. Models are declared in YAML or TOML files, loaded
//! once at startup, and shared read-only across all validation runs.

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// The declared type of a column.
///
/// Cells arrive as raw strings; the validation engine attempts to interpret
/// each cell as the declared type before evaluating constraints.
///
/// # Example
///
/// ```rust
/// use tabval_core::FieldType;
///
/// let ty: FieldType = serde_json::from_str("\"integer\"").unwrap();
/// assert_eq!(ty, FieldType::Integer);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free-form text
    String,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point (integer literals accepted)
    Float,
    /// ISO-8601 calendar date (`YYYY-MM-DD`)
    Date,
    /// Closed set of allowed string values
    Enum {
        /// The values a cell may take
        values: Vec<String>,
    },
}

impl FieldType {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Date => "date",
            FieldType::Enum { .. } => "enum",
        }
    }
}

/// Optional validation constraints applied to a field after its value has
/// been interpreted as [`FieldType`].
///
/// Constraints are evaluated in a fixed order: numeric bounds, then
/// pattern, then allowed-value set. The engine reports at most one
/// constraint violation per field per row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldConstraints {
    /// Minimum numeric value (inclusive)
    #[serde(default)]
    pub min: Option<f64>,

    /// Maximum numeric value (inclusive)
    #[serde(default)]
    pub max: Option<f64>,

    /// Regular expression the raw cell must match
    #[serde(default)]
    pub pattern: Option<String>,

    /// Values the raw cell must be one of
    #[serde(default)]
    pub allowed_values: Option<Vec<String>>,
}

impl FieldConstraints {
    /// Returns true if no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.pattern.is_none()
            && self.allowed_values.is_none()
    }
}

/// A single column rule in a data model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    /// Column name, unique within a model
    pub name: String,

    /// Whether an absent or empty cell is an error
    #[serde(default)]
    pub required: bool,

    /// Declared column type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Optional validation constraints
    #[serde(default)]
    pub constraints: Option<FieldConstraints>,
}

/// A named, ordered set of column rules.
///
/// Immutable after load; the registry hands out shared references so a
/// model is parsed exactly once per process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataModel {
    /// Registry key for this model
    pub name: String,

    /// Column rules, in validation order
    pub fields: Vec<FieldSpec>,
}

impl DataModel {
    /// Checks that the model definition itself is well-formed.
    ///
    /// A model with no fields, a duplicate field name, or an invalid regex
    /// pattern is rejected at load time; a broken definition must never
    /// reach the validation engine.
    pub fn check_definition(&self) -> Result<(), ModelError> {
        if self.fields.is_empty() {
            return Err(ModelError::EmptyModel(self.name.clone()));
        }

        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    model: self.name.clone(),
                    field: field.name.clone(),
                });
            }

            if let Some(pattern) = field.constraints.as_ref().and_then(|c| c.pattern.as_deref()) {
                regex::Regex::new(pattern).map_err(|e| ModelError::InvalidPattern {
                    model: self.name.clone(),
                    field: field.name.clone(),
                    error: e.to_string(),
                })?;
            }
        }

        Ok(())
    }

    /// Looks up a field rule by column name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{FieldSpecBuilder, ModelBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.name(), "string");
        assert_eq!(FieldType::Integer.name(), "integer");
        assert_eq!(FieldType::Float.name(), "float");
        assert_eq!(FieldType::Date.name(), "date");
        assert_eq!(FieldType::Enum { values: vec![] }.name(), "enum");
    }

    #[test]
    fn test_check_definition_ok() {
        let model = ModelBuilder::new("patients")
            .field(FieldSpecBuilder::new("id", FieldType::Integer).required().build())
            .field(
                FieldSpecBuilder::new("age", FieldType::Integer)
                    .required()
                    .min(0.0)
                    .max(120.0)
                    .build(),
            )
            .build();

        assert!(model.check_definition().is_ok());
    }

    #[test]
    fn test_check_definition_empty_model() {
        let model = ModelBuilder::new("empty").build();
        assert!(matches!(
            model.check_definition(),
            Err(ModelError::EmptyModel(_))
        ));
    }

    #[test]
    fn test_check_definition_duplicate_field() {
        let model = ModelBuilder::new("dup")
            .field(FieldSpecBuilder::new("id", FieldType::Integer).build())
            .field(FieldSpecBuilder::new("id", FieldType::String).build())
            .build();

        assert!(matches!(
            model.check_definition(),
            Err(ModelError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_check_definition_invalid_pattern() {
        let model = ModelBuilder::new("bad")
            .field(
                FieldSpecBuilder::new("code", FieldType::String)
                    .pattern("[unclosed")
                    .build(),
            )
            .build();

        assert!(matches!(
            model.check_definition(),
            Err(ModelError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_field_lookup() {
        let model = ModelBuilder::new("m")
            .field(FieldSpecBuilder::new("id", FieldType::Integer).build())
            .build();

        assert!(model.field("id").is_some());
        assert!(model.field("missing").is_none());
    }

    #[test]
    fn test_constraints_is_empty() {
        assert!(FieldConstraints::default().is_empty());
        let c = FieldConstraints {
            min: Some(0.0),
            ..Default::default()
        };
        assert!(!c.is_empty());
    }
}
