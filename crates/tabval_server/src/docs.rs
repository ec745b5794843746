//! Read-only documentation endpoints.
//!
//! Expose the active settings and model definition files so consumers can
//! inspect what an instance validates against.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::AppState;

/// `GET /settings`: the active settings file.
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Response {
    serve_yaml(&state.settings.docs.settings_path, "Settings file").await
}

/// `GET /schema`: the model definitions file.
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Response {
    serve_yaml(&state.settings.docs.schema_path, "Data schema file").await
}

async fn serve_yaml(path: &Path, label: &str) -> Response {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            info!("{label} retrieved: {}", path.display());
            ([(header::CONTENT_TYPE, "application/x-yaml")], content).into_response()
        }
        Err(_) => {
            warn!("{label} not found at: {}", path.display());
            (StatusCode::NOT_FOUND, format!("{label} not found.")).into_response()
        }
    }
}
