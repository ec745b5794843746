//! # tabval Server
//!
//! HTTP transport for the tabval validation engine.
//!
//! Routes:
//!
//! - `POST /validate`: upload a CSV and receive an incrementally emitted
//!   JSON array of validation errors
//! - `GET /settings`: the active settings file, read-only
//! - `GET /schema`: the model definitions file, read-only
//!
//! The transport owns all rejection and logging concerns; the engine below
//! it never logs and never sees an unvalidated delimiter.

pub mod docs;
pub mod validate;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use tabval_core::Settings;
use tabval_validator::ModelRegistry;

/// Shared state injected into every handler.
///
/// The registry is populated once, before the router is built, and read
/// without locking thereafter.
pub struct AppState {
    /// Runtime settings
    pub settings: Settings,
    /// One-time-populated model cache
    pub registry: ModelRegistry,
}

/// Builds the application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/validate", post(validate::validate_csv))
        .route("/settings", get(docs::get_settings))
        .route("/schema", get(docs::get_schema))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
