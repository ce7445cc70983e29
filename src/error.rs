//! Error types and constructors.
//!
//! Two layers are used:
//!
//! - [`ReviewError`] describes configuration problems inside the rule engine
//!   (unknown rule types, malformed components, bad payloads, registry
//!   conflicts). Every variant means "this rule could not be evaluated" and is
//!   always surfaced to the caller.
//! - [`AppError`] is used at the application edge (file IO, SQL parsing,
//!   configuration files). [`ReviewError`] converts into it.

pub use masterror::{AppError, AppResult};

use crate::schema::ComponentKind;

/// Configuration error raised by conversion, registry or check setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    /// Rule type is not part of the schema catalog
    #[error("unknown SQL review rule type: {0}")]
    UnknownRuleType(String),

    /// Rule level string could not be parsed
    #[error("unknown SQL review rule level: {0}")]
    UnknownLevel(String),

    /// Dialect string could not be parsed
    #[error("unknown SQL dialect: {0}")]
    UnknownDialect(String),

    /// Rule level cannot be turned into a finding status
    #[error("rule {rule_type} has level {level} which cannot produce findings")]
    UnusableLevel { rule_type: String, level: String },

    /// Rule and template describe different rule types
    #[error("rule type {rule} does not match template type {template}")]
    RuleTypeMismatch { rule: String, template: String },

    /// Template lacks a component the rule type requires
    #[error("rule {rule_type} requires a {kind} component")]
    MissingComponent {
        rule_type: String,
        kind:      ComponentKind
    },

    /// Template components differ from the declared composition
    #[error("rule {rule_type} expects components [{expected}], found [{found}]")]
    ComponentMismatch {
        rule_type: String,
        expected:  String,
        found:     String
    },

    /// Component value is out of range for the stored payload
    #[error("invalid value for component {key} of rule {rule_type}: {message}")]
    InvalidComponentValue {
        rule_type: String,
        key:       String,
        message:   String
    },

    /// Payload is absent or of a variant the rule type does not use
    #[error("rule {rule_type} expects a {expected} payload")]
    PayloadMismatch {
        rule_type: String,
        expected:  &'static str
    },

    /// Naming format is not a valid regular expression
    #[error("invalid naming format {pattern:?}: {message}")]
    InvalidFormat { pattern: String, message: String },

    /// No advisor is registered for the pair
    #[error("no advisor registered for rule {rule_type} on {dialect}")]
    AdvisorNotFound { dialect: String, rule_type: String },

    /// Rule type is not offered on the dialect
    #[error("rule {rule_type} is not offered on {dialect}")]
    TemplateNotFound { dialect: String, rule_type: String },

    /// Advisor registered twice for the same pair
    #[error("advisor for rule {rule_type} on {dialect} is already registered")]
    DuplicateAdvisor { dialect: String, rule_type: String },

    /// Preset name is not built in
    #[error("unknown rule preset: {0}")]
    UnknownPreset(String),

    /// Preset content could not be loaded
    #[error("invalid rule preset {name}: {message}")]
    InvalidPreset { name: String, message: String }
}

/// Result alias for the rule engine
pub type ReviewResult<T> = Result<T, ReviewError>;

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create query parse error with optional position info
pub fn query_parse_error(message: impl Into<String>) -> AppError {
    let msg = message.into();
    AppError::bad_request(format_sql_error("Query parse error", &msg))
}

/// Create policy parse error
pub fn policy_parse_error(path: &str, message: impl Into<String>) -> AppError {
    AppError::bad_request(format!(
        "Invalid policy file '{}': {}",
        path,
        message.into()
    ))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create output serialization error
pub fn output_error(message: impl Into<String>) -> AppError {
    AppError::internal(message.into())
}

/// Format SQL error with position highlighting
fn format_sql_error(prefix: &str, message: &str) -> String {
    // sqlparser format: "... at Line: X, Column Y"
    if let Some(pos) = extract_position(message) {
        format!(
            "{} at line {}, column {}:\n  {}",
            prefix, pos.line, pos.column, message
        )
    } else {
        format!("{}:\n  {}", prefix, message)
    }
}

struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    let line_marker = "Line: ";
    let col_marker = ", Column ";

    let line_start = message.find(line_marker)?;
    let line_num_start = line_start + line_marker.len();
    let col_start = message[line_num_start..].find(col_marker)?;
    let line_str = &message[line_num_start..line_num_start + col_start];
    let col_num_start = line_num_start + col_start + col_marker.len();
    let col_end = message[col_num_start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(message.len() - col_num_start);
    let col_str = &message[col_num_start..col_num_start + col_end];

    match (line_str.parse(), col_str.parse()) {
        (Ok(line), Ok(column)) => Some(SqlPosition { line, column }),
        _ => None
    }
}
