//! Runtime settings shared by every call site.
//!
//! Settings are deserialized from a YAML file (see `tabval_parser` for the
//! loader); every field has a default so a partial file is still usable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Validation run parameters
    #[serde(default)]
    pub data: DataSettings,

    /// HTTP server binding
    #[serde(default)]
    pub server: ServerSettings,

    /// Read-only documentation endpoints
    #[serde(default)]
    pub docs: DocsSettings,

    /// Log filtering
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Which model to validate against and how to chunk the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Name of the model to validate against
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Rows per chunk when streaming
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum number of errors to collect; unbounded when unset
    #[serde(default)]
    pub max_errors: Option<usize>,

    /// Path to the model definitions file
    #[serde(default = "default_models_path")]
    pub models_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            chunk_size: default_chunk_size(),
            max_errors: None,
            models_path: default_models_path(),
        }
    }
}

/// HTTP server binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// The socket address string to bind.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Files served read-only by the auxiliary endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsSettings {
    /// Settings file exposed at `GET /settings`
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,

    /// Model definitions file exposed at `GET /schema`
    #[serde(default = "default_models_path")]
    pub schema_path: PathBuf,
}

impl Default for DocsSettings {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            schema_path: default_models_path(),
        }
    }
}

/// Log filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Tracing filter directive (e.g. `info`, `debug`)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_model_name() -> String {
    "default".to_string()
}

fn default_chunk_size() -> usize {
    10_000
}

fn default_models_path() -> PathBuf {
    PathBuf::from("config/models.yaml")
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("config/settings.yaml")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.data.model_name, "default");
        assert_eq!(settings.data.chunk_size, 10_000);
        assert_eq!(settings.data.max_errors, None);
        assert_eq!(settings.server.socket_addr(), "0.0.0.0:8080");
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let json = r#"{"data": {"model_name": "PatientData", "max_errors": 100}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.data.model_name, "PatientData");
        assert_eq!(settings.data.max_errors, Some(100));
        assert_eq!(settings.data.chunk_size, 10_000);
        assert_eq!(settings.server.port, 8080);
    }
}
