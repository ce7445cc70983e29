use rayon::prelude::*;
use tracing::debug;

use super::{
    registry::AdvisorRegistry,
    types::{Context, Finding, ReviewReport, RuleFindings}
};
use crate::{
    error::{ReviewError, ReviewResult},
    schema::{Policy, Rule, RuleLevel, RuleType},
    syntax::{SqlDialect, SyntaxTree}
};

/// Runs enabled rules against a parsed statement.
///
/// # Example
///
/// ```
/// use sql_review::{
///     advisor::{AdvisorRegistry, PolicyEvaluator, Status},
///     schema::builtin_catalog,
///     syntax::{SqlDialect, parse_tree}
/// };
///
/// let registry = AdvisorRegistry::builtin().unwrap();
/// let policy = builtin_catalog()
///     .unwrap()
///     .preset_policy("prod", SqlDialect::MySQL)
///     .unwrap();
///
/// let sql = "DELETE FROM orders";
/// let tree = parse_tree(sql, SqlDialect::MySQL).unwrap();
/// let report = PolicyEvaluator::new(&registry)
///     .review(sql, &tree, SqlDialect::MySQL, &policy)
///     .unwrap();
///
/// assert_eq!(report.highest_status(), Status::Error);
/// ```
pub struct PolicyEvaluator<'r> {
    registry: &'r AdvisorRegistry
}

impl<'r> PolicyEvaluator<'r> {
    pub fn new(registry: &'r AdvisorRegistry) -> Self {
        Self {
            registry
        }
    }

    /// Run one rule through the advisor registered for it
    ///
    /// # Errors
    ///
    /// Fails if the rule type is unknown, no advisor is registered for the
    /// pair, or the advisor rejects the rule configuration.
    pub fn check(
        &self,
        statement: &str,
        tree: &SyntaxTree,
        dialect: SqlDialect,
        rule: &Rule
    ) -> ReviewResult<Vec<Finding>> {
        let rule_type: RuleType = rule.rule_type.parse()?;
        let advisor =
            self.registry
                .lookup(dialect, rule_type)
                .ok_or_else(|| ReviewError::AdvisorNotFound {
                    dialect:   dialect.to_string(),
                    rule_type: rule_type.to_string()
                })?;
        advisor.check(&Context {
            tree,
            statement,
            rule
        })
    }

    /// Run every enabled rule of `policy` that targets `dialect`.
    ///
    /// Rules run in parallel; results keep the policy's rule order. Disabled
    /// rules, rules for other dialects and rule types without an advisor are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns the error of the earliest failing rule in policy order, no
    /// matter which worker hit an error first.
    pub fn review(
        &self,
        statement: &str,
        tree: &SyntaxTree,
        dialect: SqlDialect,
        policy: &Policy
    ) -> ReviewResult<ReviewReport> {
        let mut report = ReviewReport::new(tree.nodes.len());
        let mut runnable = Vec::new();
        for rule in &policy.rule_list {
            if rule.level == RuleLevel::Disabled || rule.dialect != dialect {
                continue;
            }
            let rule_type: RuleType = rule.rule_type.parse()?;
            if self.registry.lookup(dialect, rule_type).is_none() {
                debug!(rule = %rule_type, %dialect, "no advisor, skipping rule");
                report.skipped.push(rule.rule_type.clone());
                continue;
            }
            runnable.push(rule);
        }

        let results = runnable
            .par_iter()
            .map(|rule| {
                self.check(statement, tree, dialect, rule)
                    .map(|findings| RuleFindings {
                        rule_type: rule.rule_type.clone(),
                        level: rule.level,
                        findings
                    })
            })
            .collect::<Vec<_>>();
        for result in results {
            report.add_result(result?);
        }
        debug!(
            policy = %policy.id,
            rules = report.rules_count,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "policy review finished"
        );
        Ok(report)
    }
}
