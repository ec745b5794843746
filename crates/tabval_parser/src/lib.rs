//! Parser for tabval model definitions (YAML/TOML formats).
//!
//! A model definitions file declares one or more named data models under a
//! top-level `models` list. This crate parses such files into strongly
//! typed [`DataModel`] values, checking each definition for structural
//! faults (duplicate fields, invalid patterns) at load time, and also
//! loads the runtime [`Settings`] document.
//!
//! # Example
//!
//! ```rust
//! use tabval_parser::parse_yaml;
//!
//! let yaml = r#"
//! models:
//!   - name: patients
//!     fields:
//!       - name: id
//!         type: integer
//!         required: true
//! "#;
//!
//! let models = parse_yaml(yaml).expect("Failed to parse model definitions");
//! assert_eq!(models[0].name, "patients");
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use tabval_core::{DataModel, ModelError, Settings};

/// Errors that can occur while loading model definitions or settings.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A parsed model definition is structurally broken
    #[error(transparent)]
    ModelError(#[from] ModelError),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported model definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFileFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Top-level shape of a model definitions document.
#[derive(Debug, Deserialize)]
struct ModelsDocument {
    models: Vec<DataModel>,
}

/// Parse model definitions from a YAML string.
///
/// Every parsed model is definition-checked; a duplicate field name or an
/// invalid regex pattern fails the whole load.
pub fn parse_yaml(content: &str) -> Result<Vec<DataModel>> {
    let document: ModelsDocument = serde_yaml_ng::from_str(content)?;
    check_models(&document.models)?;
    Ok(document.models)
}

/// Parse model definitions from a TOML string.
///
/// ```rust
/// use tabval_parser::parse_toml;
///
/// let toml = r#"
/// [[models]]
/// name = "patients"
///
/// [[models.fields]]
/// name = "id"
/// type = "integer"
/// required = true
/// "#;
///
/// let models = parse_toml(toml).unwrap();
/// assert_eq!(models[0].fields.len(), 1);
/// ```
pub fn parse_toml(content: &str) -> Result<Vec<DataModel>> {
    let document: ModelsDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    check_models(&document.models)?;
    Ok(document.models)
}

fn check_models(models: &[DataModel]) -> Result<()> {
    for model in models {
        model.check_definition()?;
    }
    Ok(())
}

/// Detect the model file format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → [`ModelFileFormat::Yaml`]
/// * `.toml` → [`ModelFileFormat::Toml`]
pub fn detect_format(path: &Path) -> Result<ModelFileFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ModelFileFormat::Yaml),
        "toml" => Ok(ModelFileFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a model definitions file with automatic format detection.
pub fn parse_models_file(path: &Path) -> Result<Vec<DataModel>> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;

    match format {
        ModelFileFormat::Yaml => parse_yaml(&content),
        ModelFileFormat::Toml => parse_toml(&content),
    }
}

/// Load the runtime settings document from a YAML file.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_yaml_ng::from_str(&content)?;
    Ok(settings)
}
