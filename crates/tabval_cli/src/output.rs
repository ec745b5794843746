use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use tabval_core::ValidationError;

/// Writes the error report as a JSON array: compact on stdout, pretty
/// printed when writing to a file. Diagnostics go to stderr so stdout
/// stays machine-parseable.
pub fn write_errors(errors: &[ValidationError], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let json = serde_json::to_string_pretty(errors)
                .context("Failed to serialize error report")?;
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let json =
                serde_json::to_string(errors).context("Failed to serialize error report")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}
