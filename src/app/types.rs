//! Application types for CLI commands.

use std::path::PathBuf;

use crate::{cli::Format, syntax::SqlDialect};

/// Parameters for the review command.
///
/// `None` fields fall back to configuration, then to built-in defaults.
#[derive(Debug, Clone)]
pub struct ReviewParams {
    /// Path to the SQL file or "-" for stdin input.
    pub queries_path:  String,
    pub dialect:       Option<SqlDialect>,
    /// Stored policy file; takes precedence over any preset.
    pub policy_path:   Option<PathBuf>,
    pub preset:        Option<String>,
    pub output_format: Format,
    pub verbose:       bool,
    pub no_color:      bool
}

/// Parameters for the rules command.
#[derive(Debug, Clone)]
pub struct RulesParams {
    pub preset:        Option<String>,
    pub dialect:       Option<SqlDialect>,
    pub output_format: Format,
    pub no_color:      bool
}

/// Rendered output of a command together with its exit code.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code: 0 clean, 1 warnings, 2 errors
    pub exit_code: i32,
    pub stdout:    String
}
