//! Builder pattern for constructing data models in code.
//!
//! Model definition files are the normal source of models; these builders
//! exist for tests and for embedding tabval as a library.

use crate::{DataModel, FieldConstraints, FieldSpec, FieldType};

/// Builder for a [`DataModel`].
///
/// # Example
///
/// ```rust
/// use tabval_core::{FieldSpecBuilder, FieldType, ModelBuilder};
///
/// let model = ModelBuilder::new("patients")
///     .field(FieldSpecBuilder::new("id", FieldType::Integer).required().build())
///     .field(
///         FieldSpecBuilder::new("age", FieldType::Integer)
///             .required()
///             .min(0.0)
///             .max(120.0)
///             .build(),
///     )
///     .build();
///
/// assert_eq!(model.fields.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ModelBuilder {
    /// Creates a builder for a model with the given registry name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends one field rule.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends multiple field rules.
    pub fn fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Builds the model.
    pub fn build(self) -> DataModel {
        DataModel {
            name: self.name,
            fields: self.fields,
        }
    }
}

/// Builder for a [`FieldSpec`].
#[derive(Debug)]
pub struct FieldSpecBuilder {
    name: String,
    required: bool,
    field_type: FieldType,
    constraints: FieldConstraints,
}

impl FieldSpecBuilder {
    /// Creates a builder for an optional field of the given type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            required: false,
            field_type,
            constraints: FieldConstraints::default(),
        }
    }

    /// Marks the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the inclusive minimum bound.
    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Sets the inclusive maximum bound.
    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    /// Sets the regex pattern constraint.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    /// Sets the allowed-value set constraint.
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the field rule.
    pub fn build(self) -> FieldSpec {
        let constraints = if self.constraints.is_empty() {
            None
        } else {
            Some(self.constraints)
        };
        FieldSpec {
            name: self.name,
            required: self.required,
            field_type: self.field_type,
            constraints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_without_constraints_has_none() {
        let field = FieldSpecBuilder::new("id", FieldType::Integer).build();
        assert_eq!(field.constraints, None);
        assert!(!field.required);
    }

    #[test]
    fn test_field_with_constraints() {
        let field = FieldSpecBuilder::new("age", FieldType::Integer)
            .required()
            .min(0.0)
            .max(120.0)
            .build();

        assert!(field.required);
        let constraints = field.constraints.unwrap();
        assert_eq!(constraints.min, Some(0.0));
        assert_eq!(constraints.max, Some(120.0));
        assert_eq!(constraints.pattern, None);
    }

    #[test]
    fn test_allowed_values() {
        let field = FieldSpecBuilder::new("status", FieldType::String)
            .allowed_values(["active", "inactive"])
            .build();

        assert_eq!(
            field.constraints.unwrap().allowed_values,
            Some(vec!["active".to_string(), "inactive".to_string()])
        );
    }

    #[test]
    fn test_model_builder_preserves_field_order() {
        let model = ModelBuilder::new("m")
            .field(FieldSpecBuilder::new("a", FieldType::String).build())
            .field(FieldSpecBuilder::new("b", FieldType::String).build())
            .build();

        let names: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
