//! `config` command implementation.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::PomodoroError;

/// Render the effective configuration.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn show_config(config: &Config, format: OutputFormat) -> Result<String, PomodoroError> {
    match format {
        OutputFormat::Pretty => Ok(config.to_yaml()?.trim_end().to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
    }
}
