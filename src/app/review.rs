//! Command execution logic.
//!
//! `run_review` orchestrates the review pipeline: read SQL, parse it into a
//! review tree, resolve the policy, run every enabled rule and format the
//! report.

use tracing::info;

use super::{
    convert::convert_format,
    helpers::{
        calculate_exit_code, create_output_options, load_policy, read_queries_input,
        resolve_dialect, resolve_preset
    },
    types::{CommandOutput, ReviewParams, RulesParams}
};
use crate::{
    advisor::{AdvisorRegistry, PolicyEvaluator},
    cli::Format,
    config::Config,
    error::AppResult,
    output::{OutputOptions, format_policy, format_review_report, format_templates},
    schema::{Policy, RuleTemplate, builtin_catalog},
    syntax::{SqlDialect, parse_tree}
};

/// Reviews SQL text against a stored policy or a built-in preset.
///
/// A policy file, when given, is used as is; otherwise the preset (from
/// the command line, configuration or the default) is exported for the
/// dialect. Configured disables and level overrides apply to both.
///
/// # Errors
///
/// Returns an error if input cannot be read, the SQL does not parse, the
/// policy cannot be loaded or a rule is misconfigured.
pub fn run_review(params: ReviewParams, config: &Config) -> AppResult<CommandOutput> {
    let dialect = resolve_dialect(params.dialect, &config.review)?;
    let sql = read_queries_input(&params.queries_path)?;
    let tree = parse_tree(&sql, dialect)?;

    let mut policy = match &params.policy_path {
        Some(path) => load_policy(path)?,
        None => {
            let preset = resolve_preset(params.preset.clone(), &config.review);
            builtin_catalog()?.preset_policy(&preset, dialect)?
        }
    };
    config.review.apply(&mut policy)?;
    info!(policy = %policy.id, %dialect, rules = policy.rule_list.len(), "reviewing");

    let registry = AdvisorRegistry::builtin()?;
    let report = PolicyEvaluator::new(&registry).review(&sql, &tree, dialect, &policy)?;

    let opts = create_output_options(params.output_format, params.verbose, params.no_color);
    Ok(CommandOutput {
        exit_code: calculate_exit_code(&report),
        stdout:    format_review_report(&report, &opts)?
    })
}

/// Lists the schema catalog or the templates of one preset.
///
/// # Errors
///
/// Returns an error if the preset is unknown.
pub fn run_rules(params: RulesParams) -> AppResult<CommandOutput> {
    let catalog = builtin_catalog()?;
    let templates: &[RuleTemplate] = match &params.preset {
        Some(name) => catalog.preset(name)?,
        None => catalog.schema()
    };
    let selected: Vec<RuleTemplate> = templates
        .iter()
        .filter(|t| params.dialect.is_none_or(|d| t.dialect == d))
        .cloned()
        .collect();
    let opts = create_output_options(params.output_format, false, params.no_color);
    Ok(CommandOutput {
        exit_code: 0,
        stdout:    format_templates(&selected, &opts)?
    })
}

/// Exports a preset as a stored policy for one dialect.
///
/// # Errors
///
/// Returns an error if the preset is unknown or misconfigured.
pub fn run_policy(
    preset: Option<String>,
    dialect: Option<SqlDialect>,
    format: Format,
    config: &Config
) -> AppResult<CommandOutput> {
    let dialect = resolve_dialect(dialect, &config.review)?;
    let preset = resolve_preset(preset, &config.review);
    let policy: Policy = builtin_catalog()?.preset_policy(&preset, dialect)?;
    let opts = OutputOptions {
        format: convert_format(format),
        colored: false,
        verbose: false
    };
    Ok(CommandOutput {
        exit_code: 0,
        stdout:    format_policy(&policy, &opts)?
    })
}
