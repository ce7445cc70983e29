//! Helper functions for CLI operations.
//!
//! Reading input, resolving defaults from configuration, loading stored
//! policies and calculating exit codes.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path
};

use super::convert::convert_format;
use crate::{
    advisor::{ReviewReport, Status},
    cli::Format,
    config::{DEFAULT_PRESET, ReviewConfig},
    error::{AppResult, file_read_error, policy_parse_error},
    output::OutputOptions,
    schema::Policy,
    syntax::SqlDialect
};

/// Calculates the process exit code from the worst finding status.
///
/// - `0` - No violations
/// - `1` - At least one warning present
/// - `2` - At least one error present
///
/// # Example
///
/// ```
/// use sql_review::{advisor::ReviewReport, app::calculate_exit_code};
///
/// let report = ReviewReport::new(1);
/// assert_eq!(calculate_exit_code(&report), 0);
/// ```
pub fn calculate_exit_code(report: &ReviewReport) -> i32 {
    match report.highest_status() {
        Status::Error => 2,
        Status::Warning => 1,
        Status::Success => 0
    }
}

/// Reads SQL from a file or stdin.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_queries_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Loads a stored policy; `.json` files are read as JSON, anything else as
/// YAML.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a policy.
pub fn load_policy(path: &Path) -> AppResult<Policy> {
    let display = path.display().to_string();
    let content = read_to_string(path).map_err(|e| file_read_error(&display, e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).map_err(|e| policy_parse_error(&display, e.to_string()))
    } else {
        serde_yaml::from_str(&content).map_err(|e| policy_parse_error(&display, e.to_string()))
    }
}

/// Picks the dialect: command line, then configuration, then generic.
///
/// # Errors
///
/// Returns an error if the configured dialect is unknown.
pub fn resolve_dialect(cli: Option<SqlDialect>, config: &ReviewConfig) -> AppResult<SqlDialect> {
    if let Some(dialect) = cli {
        return Ok(dialect);
    }
    match &config.dialect {
        Some(name) => Ok(name.parse()?),
        None => Ok(SqlDialect::default())
    }
}

/// Picks the preset: command line, then configuration, then `sample`.
pub fn resolve_preset(cli: Option<String>, config: &ReviewConfig) -> String {
    cli.or_else(|| config.preset.clone())
        .unwrap_or_else(|| DEFAULT_PRESET.to_string())
}

/// Creates output options from CLI parameters.
pub fn create_output_options(format: Format, verbose: bool, no_color: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}
