//! Result formatting for text, JSON and YAML output.

use colored::Colorize;
use serde::Serialize;

use crate::{
    advisor::{ReviewReport, Status},
    error::{AppResult, output_error},
    schema::{ComponentPayload, Policy, RuleLevel, RuleTemplate}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| output_error(e.to_string()))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_yaml::to_string(value).map_err(|e| output_error(e.to_string()))
}

/// Format a policy review report
pub fn format_review_report(report: &ReviewReport, opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Text => Ok(format_review_text(report, opts))
    }
}

fn format_review_text(report: &ReviewReport, opts: &OutputOptions) -> String {
    let mut output = String::new();
    let header = "=== SQL Review ===";
    if opts.colored {
        output.push_str(&header.bold().to_string());
    } else {
        output.push_str(header);
    }
    output.push_str("\n\n");

    for result in &report.results {
        for finding in &result.findings {
            if finding.status == Status::Success && !opts.verbose {
                continue;
            }
            let status = format!("[{}]", finding.status);
            let status = if opts.colored {
                match finding.status {
                    Status::Error => status.red().bold().to_string(),
                    Status::Warning => status.yellow().bold().to_string(),
                    Status::Success => status.green().to_string()
                }
            } else {
                status
            };
            if finding.status == Status::Success {
                output.push_str(&format!("{} {}\n", status, result.rule_type));
                continue;
            }
            output.push_str(&format!(
                "{} {} (line {}): {}\n",
                status, finding.title, finding.line, finding.content
            ));
            if opts.verbose {
                output.push_str(&format!("    code: {} ({})\n", finding.code, finding.code.number()));
            }
        }
    }

    if opts.verbose && !report.skipped.is_empty() {
        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.as_str()).collect();
        output.push_str(&format!("Skipped (no advisor): {}\n", skipped.join(", ")));
    }

    output.push_str(&format!(
        "\nStatements: {}, rules: {}, errors: {}, warnings: {}\n",
        report.statements_count,
        report.rules_count,
        report.error_count(),
        report.warning_count()
    ));
    output
}

/// Format a list of rule templates
pub fn format_templates(templates: &[RuleTemplate], opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => to_json(templates),
        OutputFormat::Yaml => to_yaml(templates),
        OutputFormat::Text => Ok(format_templates_text(templates, opts))
    }
}

fn format_templates_text(templates: &[RuleTemplate], opts: &OutputOptions) -> String {
    let mut output = String::new();
    for template in templates {
        let level = template.level.to_string();
        let level = if opts.colored {
            match template.level {
                RuleLevel::Error => level.red().to_string(),
                RuleLevel::Warning => level.yellow().to_string(),
                RuleLevel::Disabled => level.dimmed().to_string()
            }
        } else {
            level
        };
        let rule_type = if opts.colored {
            template.rule_type.as_str().cyan().bold().to_string()
        } else {
            template.rule_type.to_string()
        };
        output.push_str(&format!(
            "{} [{}] {} {}\n",
            rule_type, template.category, template.dialect, level
        ));
        for component in &template.component_list {
            output.push_str(&format!(
                "    {} = {}\n",
                component.key,
                component_value(&component.payload)
            ));
        }
    }
    output
}

/// Current value of a component, falling back to its default
fn component_value(payload: &ComponentPayload) -> String {
    match payload {
        ComponentPayload::Number {
            default,
            value
        } => value.unwrap_or(*default).to_string(),
        ComponentPayload::String {
            default,
            value
        }
        | ComponentPayload::Template {
            default,
            value,
            ..
        } => format!("{:?}", value.as_ref().unwrap_or(default)),
        ComponentPayload::Boolean {
            default,
            value
        } => value.unwrap_or(*default).to_string(),
        ComponentPayload::StringArray {
            default,
            value
        } => format!("{:?}", value.as_ref().unwrap_or(default))
    }
}

/// Format a stored policy; text output uses YAML, the stored form
pub fn format_policy(policy: &Policy, opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => to_json(policy),
        OutputFormat::Yaml | OutputFormat::Text => to_yaml(policy)
    }
}
