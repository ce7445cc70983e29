//! Application logic for the SQL Review CLI.
//!
//! This module contains the core application logic separated from the main
//! entry point to enable testing.

mod convert;
mod helpers;
mod review;
mod types;

pub use convert::{convert_dialect, convert_format};
pub use helpers::{
    calculate_exit_code, create_output_options, load_policy, read_queries_input,
    resolve_dialect, resolve_preset
};
pub use review::{run_policy, run_review, run_rules};
pub use types::{CommandOutput, ReviewParams, RulesParams};

use crate::{
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};

/// Dispatches a parsed command line.
///
/// # Errors
///
/// Returns the error of the executed command.
pub fn run(cli: Cli, config: &Config) -> AppResult<CommandOutput> {
    match cli.command {
        Commands::Review {
            queries,
            dialect,
            policy,
            preset,
            output_format,
            verbose,
            no_color
        } => run_review(
            ReviewParams {
                queries_path: queries.display().to_string(),
                dialect: dialect.map(convert_dialect),
                policy_path: policy,
                preset,
                output_format,
                verbose,
                no_color
            },
            config
        ),
        Commands::Rules {
            preset,
            dialect,
            output_format,
            no_color
        } => run_rules(RulesParams {
            preset,
            dialect: dialect.map(convert_dialect),
            output_format,
            no_color
        }),
        Commands::Policy {
            preset,
            dialect,
            output_format
        } => run_policy(preset, dialect.map(convert_dialect), output_format, config)
    }
}
