//! Model registry.
//!
//! A process-wide, read-only cache of named data models. Population
//! happens exactly once, at construction, before any validation run
//! starts; afterwards every run reads the same shared models without
//! locking. Callers receive the registry by explicit injection (an `Arc`
//! in server state, a local in the CLI), never through an ambient global.

use std::collections::HashMap;
use std::sync::Arc;

use tabval_core::DataModel;

use crate::ValidateError;

/// Name → model cache, immutable after construction.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<DataModel>>,
}

impl ModelRegistry {
    /// Builds a registry from parsed model definitions.
    ///
    /// Every definition is checked and duplicate names are rejected, so a
    /// registry that constructs successfully can only hand out well-formed
    /// models.
    pub fn new(models: Vec<DataModel>) -> Result<Self, ValidateError> {
        let mut cache = HashMap::with_capacity(models.len());
        for model in models {
            model.check_definition()?;
            let name = model.name.clone();
            if cache.insert(name.clone(), Arc::new(model)).is_some() {
                return Err(ValidateError::DuplicateModel(name));
            }
        }
        Ok(Self { models: cache })
    }

    /// Looks up a model by name.
    ///
    /// Repeated calls return handles to the identical cached instance;
    /// nothing is re-parsed.
    pub fn get(&self, name: &str) -> Result<Arc<DataModel>, ValidateError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| ValidateError::UnknownModel(name.to_string()))
    }

    /// Names of all registered models.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True if no model is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabval_core::{FieldSpecBuilder, FieldType, ModelBuilder};

    fn model(name: &str) -> DataModel {
        ModelBuilder::new(name)
            .field(FieldSpecBuilder::new("id", FieldType::Integer).required().build())
            .build()
    }

    #[test]
    fn test_get_returns_same_instance() {
        let registry = ModelRegistry::new(vec![model("patients")]).unwrap();
        let a = registry.get("patients").unwrap();
        let b = registry.get("patients").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_unknown_model() {
        let registry = ModelRegistry::new(vec![model("patients")]).unwrap();
        assert!(matches!(
            registry.get("visits"),
            Err(ValidateError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_duplicate_model_rejected() {
        let result = ModelRegistry::new(vec![model("patients"), model("patients")]);
        assert!(matches!(result, Err(ValidateError::DuplicateModel(_))));
    }

    #[test]
    fn test_broken_definition_rejected() {
        let result = ModelRegistry::new(vec![ModelBuilder::new("empty").build()]);
        assert!(matches!(result, Err(ValidateError::Model(_))));
    }
}
