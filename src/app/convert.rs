//! Type conversion functions for CLI to internal types.
//!
//! The argument parser has its own value enums so that `--help` can list
//! lowercase choices; these functions map them onto the types the review
//! engine and report writers work with.

use crate::{
    cli::{Dialect, Format},
    output::OutputFormat,
    syntax::SqlDialect
};

/// Converts a CLI dialect enum to the internal SQL dialect type.
///
/// The result selects both the `sqlparser` dialect used to build the review
/// tree and the dialect rules must target to be evaluated.
///
/// # Arguments
///
/// * `dialect` - Dialect chosen with `--dialect`
///
/// # Returns
///
/// The matching `SqlDialect` variant.
///
/// # Example
///
/// ```
/// use sql_review::{app::convert_dialect, cli::Dialect, syntax::SqlDialect};
///
/// assert_eq!(convert_dialect(Dialect::Mssql), SqlDialect::MsSql);
/// assert_eq!(convert_dialect(Dialect::Postgresql), SqlDialect::PostgreSQL);
/// ```
pub fn convert_dialect(dialect: Dialect) -> SqlDialect {
    match dialect {
        Dialect::Generic => SqlDialect::Generic,
        Dialect::Mysql => SqlDialect::MySQL,
        Dialect::Postgresql => SqlDialect::PostgreSQL,
        Dialect::Sqlite => SqlDialect::SQLite,
        Dialect::Clickhouse => SqlDialect::ClickHouse,
        Dialect::Mssql => SqlDialect::MsSql
    }
}

/// Converts a CLI format enum to the internal output format type.
///
/// # Arguments
///
/// * `format` - Report format chosen with `--format`
///
/// # Returns
///
/// The `OutputFormat` the report writer renders with.
///
/// # Example
///
/// ```
/// use sql_review::{app::convert_format, cli::Format, output::OutputFormat};
///
/// assert_eq!(convert_format(Format::Yaml), OutputFormat::Yaml);
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_dialect_all() {
        assert_eq!(convert_dialect(Dialect::Generic), SqlDialect::Generic);
        assert_eq!(convert_dialect(Dialect::Mysql), SqlDialect::MySQL);
        assert_eq!(convert_dialect(Dialect::Postgresql), SqlDialect::PostgreSQL);
        assert_eq!(convert_dialect(Dialect::Sqlite), SqlDialect::SQLite);
        assert_eq!(convert_dialect(Dialect::Clickhouse), SqlDialect::ClickHouse);
        assert_eq!(convert_dialect(Dialect::Mssql), SqlDialect::MsSql);
    }

    #[test]
    fn test_convert_format_all() {
        assert_eq!(convert_format(Format::Text), OutputFormat::Text);
        assert_eq!(convert_format(Format::Json), OutputFormat::Json);
        assert_eq!(convert_format(Format::Yaml), OutputFormat::Yaml);
    }
}
