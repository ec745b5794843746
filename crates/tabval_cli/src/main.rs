mod output;

use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabval_core::Delimiter;
use tabval_validator::{ModelRegistry, RowBatch, validate};

#[derive(Parser)]
#[command(name = "tabval")]
#[command(version, about = "Validate a CSV file against a declarative data model", long_about = None)]
struct Cli {
    /// Path to the input CSV file
    #[arg(long)]
    input: PathBuf,

    /// Path to write JSON errors (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// CSV delimiter
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: Delimiter,

    /// Path to the settings file
    #[arg(long, default_value = "config/settings.yaml")]
    settings: PathBuf,

    /// Validate against this model instead of the configured one
    #[arg(long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_delimiter(s: &str) -> Result<Delimiter, String> {
    Delimiter::from_str(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let settings = tabval_parser::load_settings(&cli.settings)
        .with_context(|| format!("Failed to load settings from {}", cli.settings.display()))?;

    let models = tabval_parser::parse_models_file(&settings.data.models_path)
        .with_context(|| {
            format!(
                "Failed to load model definitions from {}",
                settings.data.models_path.display()
            )
        })?;
    let registry = ModelRegistry::new(models).context("Failed to build model registry")?;

    let model_name = cli.model.as_deref().unwrap_or(&settings.data.model_name);
    let model = registry
        .get(model_name)
        .with_context(|| format!("Model '{model_name}' is not defined"))?;

    info!("Validating {} against model '{model_name}'", cli.input.display());

    // The CLI validates eagerly: the whole file as a single chunk, no cap.
    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open input file: {}", cli.input.display()))?;
    let batch = RowBatch::from_csv_reader(file, cli.delimiter)
        .context("Failed to parse input CSV")?;
    let outcome = validate(&batch, &model, 0).context("Validation run failed")?;

    output::write_errors(&outcome.errors, cli.output.as_deref())?;

    if outcome.errors.is_empty() {
        output::print_success(&format!(
            "Validation passed: {} rows, no errors",
            outcome.rows_examined
        ));
    } else {
        output::print_error(&format!(
            "Validation failed: {} errors across {} rows",
            outcome.errors.len(),
            outcome.rows_examined
        ));
        std::process::exit(1);
    }

    Ok(())
}
