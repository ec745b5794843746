use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tabval_server::{AppState, app};
use tabval_validator::ModelRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    let settings_path = std::env::var("TABVAL_SETTINGS")
        .unwrap_or_else(|_| "config/settings.yaml".to_string());
    let settings = tabval_parser::load_settings(Path::new(&settings_path))
        .with_context(|| format!("Failed to load settings from {settings_path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(
            EnvFilter::try_new(&settings.logging.level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let models = tabval_parser::parse_models_file(&settings.data.models_path)
        .with_context(|| {
            format!(
                "Failed to load model definitions from {}",
                settings.data.models_path.display()
            )
        })?;
    let registry = ModelRegistry::new(models).context("Failed to build model registry")?;

    let mut names: Vec<_> = registry.names().collect();
    names.sort_unstable();
    info!("Data models loaded: {}", names.join(", "));

    let addr = settings.server.socket_addr();
    let state = Arc::new(AppState { settings, registry });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("tabval server listening on {addr}");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
