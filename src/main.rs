//! # SQL Review
//!
//! Checks SQL statements against coding-standard policies.
//!
//! `sql-review` parses SQL text, evaluates every enabled rule of a policy
//! with the advisor registered for the dialect, and reports findings. It
//! never executes SQL and never connects to a database.
//!
//! # Quick Start
//!
//! ```bash
//! # Review against the built-in production preset
//! sql-review review -q migration.sql --dialect mssql --preset prod
//!
//! # Review against a stored policy, JSON output
//! sql-review review -q migration.sql -p policy.yaml -f json
//!
//! # Stream statements from stdin
//! echo "DELETE FROM orders" | sql-review review -q - --dialect mysql
//!
//! # Inspect the rule catalog and export a preset as a policy
//! sql-review rules --dialect mysql
//! sql-review policy --preset dev --dialect postgresql > policy.yaml
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`SQL_REVIEW_PRESET`, `SQL_REVIEW_DIALECT`)
//! 3. `.sql-review.toml` in current directory
//! 4. `~/.config/sql-review/config.toml`
//!
//! # Exit Codes
//!
//! - `0` - No violations
//! - `1` - Warnings found
//! - `2` - Errors found
//!
//! Configuration and input errors also exit with `1` after printing the
//! error to stderr.

use std::{io, process};

use clap::Parser;
use sql_review::{
    app,
    cli::{Cli, Commands},
    config::Config
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_tracing(is_verbose(&cli));

    let result = Config::load().and_then(|config| app::run(cli, &config));
    match result {
        Ok(output) => {
            println!("{}", output.stdout);
            process::exit(output.exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn is_verbose(cli: &Cli) -> bool {
    matches!(
        cli.command,
        Commands::Review {
            verbose: true,
            ..
        }
    )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
        )
        .init();
}
