use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Review - Check SQL statements against coding-standard policies
#[derive(Parser, Debug)]
#[command(name = "sql-review")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Review SQL statements against a policy
    Review {
        /// Path to SQL file (use - for stdin)
        #[arg(short, long)]
        queries: PathBuf,

        /// SQL dialect for parsing and advisor lookup
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,

        /// Stored policy file (YAML or JSON)
        #[arg(short, long, conflicts_with = "preset")]
        policy: Option<PathBuf>,

        /// Built-in preset to review against
        #[arg(long)]
        preset: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Show passing rules, finding codes and debug logs
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// List rule templates of the catalog or a preset
    Rules {
        /// Built-in preset to list instead of the full catalog
        #[arg(long)]
        preset: Option<String>,

        /// Only list templates for this dialect
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Export a built-in preset as a stored policy
    Policy {
        /// Built-in preset to export
        #[arg(long)]
        preset: Option<String>,

        /// Dialect the policy targets
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "yaml")]
        output_format: Format
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Dialect {
    Generic,
    Mysql,
    Postgresql,
    Sqlite,
    Clickhouse,
    Mssql
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
