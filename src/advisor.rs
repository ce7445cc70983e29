//! Rule checkers and their registry.
//!
//! An [`Advisor`] checks one rule type on a parsed statement and reports
//! [`Finding`]s. Advisors are registered per (dialect, rule type) pair in an
//! [`AdvisorRegistry`]; [`PolicyEvaluator`] looks them up and runs them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ SyntaxTree  │────▶│ PolicyEvaluator  │────▶│ ReviewReport │
//! └─────────────┘     └──────────────────┘     └──────────────┘
//!                              │
//!                     ┌────────┴────────┐
//!                     │ AdvisorRegistry │
//!                     │   (parallel)    │
//!                     └─────────────────┘
//! ```
//!
//! # Implementing an Advisor
//!
//! Advisors walk the tree with a [`NodeVisitor`](crate::syntax::NodeVisitor)
//! that reacts only to the node kinds the rule cares about:
//!
//! ```
//! use sql_review::{
//!     advisor::{Advisor, Code, Context, Finding, Status},
//!     error::ReviewResult,
//!     syntax::{DropTable, NodeVisitor}
//! };
//!
//! struct NoDrop;
//!
//! struct DropVisitor {
//!     lines: Vec<usize>
//! }
//!
//! impl NodeVisitor for DropVisitor {
//!     fn visit_drop_table(&mut self, line: usize, _node: &DropTable) {
//!         self.lines.push(line);
//!     }
//! }
//!
//! impl Advisor for NoDrop {
//!     fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
//!         let status = Status::from_rule_level(&ctx.rule.rule_type, ctx.rule.level)?;
//!         let mut visitor = DropVisitor {
//!             lines: Vec::new()
//!         };
//!         ctx.tree.walk(&mut visitor);
//!         if visitor.lines.is_empty() {
//!             return Ok(vec![Finding::ok()]);
//!         }
//!         Ok(visitor
//!             .lines
//!             .into_iter()
//!             .map(|line| Finding {
//!                 status,
//!                 code: Code::TableDropNamingConventionMismatch,
//!                 title: ctx.rule.rule_type.to_string(),
//!                 content: "DROP TABLE is not allowed".into(),
//!                 line
//!             })
//!             .collect())
//!     }
//! }
//! ```

mod column;
mod evaluator;
mod naming;
mod registry;
mod statement;
mod support;
mod table;
mod types;

pub use evaluator::PolicyEvaluator;
pub use registry::AdvisorRegistry;
pub use support::{normalize_identifier, unwrap_string_literal};
pub use types::{Code, Context, Finding, ReviewReport, RuleFindings, Status};

use crate::error::ReviewResult;

/// Checker for one rule type on one dialect.
///
/// Advisors are stateless and shared between threads; every run allocates its
/// own visitor state.
pub trait Advisor: Send + Sync {
    /// Check the tree against the rule in `ctx`.
    ///
    /// The returned list is never empty: with no violation it holds the single
    /// [`Finding::ok`] placeholder.
    ///
    /// # Errors
    ///
    /// Fails if the rule's level or payload cannot be used by this advisor.
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>>;
}
