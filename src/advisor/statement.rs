//! Statement-level advisors.

use super::{
    Advisor,
    support::{FindingList, number_value},
    types::{Code, Context, Finding}
};
use crate::{
    error::ReviewResult,
    syntax::{Insert, Mutation, NodeVisitor, Select}
};

/// Queries must list their columns instead of `SELECT *`
pub struct NoSelectAll;

impl Advisor for NoSelectAll {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = NoSelectAllVisitor {
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct NoSelectAllVisitor {
    findings: FindingList
}

impl NodeVisitor for NoSelectAllVisitor {
    fn visit_select(&mut self, line: usize, node: &Select) {
        if node.has_wildcard {
            self.findings.push(
                Code::StatementSelectAll,
                line,
                "SELECT * is not allowed, list the columns explicitly".to_string()
            );
        }
    }
}

/// UPDATE and DELETE must carry a WHERE clause
pub struct RequireWhere;

impl Advisor for RequireWhere {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = RequireWhereVisitor {
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct RequireWhereVisitor {
    findings: FindingList
}

impl RequireWhereVisitor {
    fn check(&mut self, line: usize, verb: &str, node: &Mutation) {
        if !node.has_where {
            self.findings.push(
                Code::StatementNoWhere,
                line,
                format!("{} on `{}` requires WHERE clause", verb, node.table)
            );
        }
    }
}

impl NodeVisitor for RequireWhereVisitor {
    fn visit_update(&mut self, line: usize, node: &Mutation) {
        self.check(line, "UPDATE", node);
    }

    fn visit_delete(&mut self, line: usize, node: &Mutation) {
        self.check(line, "DELETE", node);
    }
}

/// LIKE patterns must not start with `%`
pub struct NoLeadingWildcardLike;

impl Advisor for NoLeadingWildcardLike {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = LeadingWildcardVisitor {
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct LeadingWildcardVisitor {
    findings: FindingList
}

impl LeadingWildcardVisitor {
    fn check(&mut self, line: usize, patterns: &[String]) {
        for pattern in patterns.iter().filter(|p| p.starts_with('%')) {
            self.findings.push(
                Code::StatementLeadingWildcardLike,
                line,
                format!(
                    "LIKE pattern '{}' starts with a wildcard, which prevents index usage",
                    pattern
                )
            );
        }
    }
}

impl NodeVisitor for LeadingWildcardVisitor {
    fn visit_select(&mut self, line: usize, node: &Select) {
        self.check(line, &node.like_patterns);
    }

    fn visit_update(&mut self, line: usize, node: &Mutation) {
        self.check(line, &node.like_patterns);
    }

    fn visit_delete(&mut self, line: usize, node: &Mutation) {
        self.check(line, &node.like_patterns);
    }
}

/// LIMIT values must not exceed the configured maximum
pub struct MaximumLimitValue;

impl Advisor for MaximumLimitValue {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = LimitValueVisitor {
            maximum:  number_value(ctx)?,
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct LimitValueVisitor {
    maximum:  i64,
    findings: FindingList
}

impl NodeVisitor for LimitValueVisitor {
    fn visit_select(&mut self, line: usize, node: &Select) {
        if let Some(limit) = node.limit
            && self.maximum > 0
            && i64::try_from(limit).map_or(true, |limit| limit > self.maximum)
        {
            self.findings.push(
                Code::StatementExceedMaximumLimitValue,
                line,
                format!(
                    "The limit value {} exceeds the maximum allowed value {}",
                    limit, self.maximum
                )
            );
        }
    }
}

/// INSERT statements must name their target columns
pub struct InsertMustSpecifyColumn;

impl Advisor for InsertMustSpecifyColumn {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = InsertColumnVisitor {
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct InsertColumnVisitor {
    findings: FindingList
}

impl NodeVisitor for InsertColumnVisitor {
    fn visit_insert(&mut self, line: usize, node: &Insert) {
        if !node.has_columns {
            self.findings.push(
                Code::InsertNotSpecifyColumn,
                line,
                format!("INSERT into `{}` must specify columns", node.table)
            );
        }
    }
}

/// `INSERT ... VALUES` must not exceed the configured row count
pub struct InsertRowLimit;

impl Advisor for InsertRowLimit {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = InsertRowLimitVisitor {
            maximum:  number_value(ctx)?,
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct InsertRowLimitVisitor {
    maximum:  i64,
    findings: FindingList
}

impl NodeVisitor for InsertRowLimitVisitor {
    fn visit_insert(&mut self, line: usize, node: &Insert) {
        // INSERT ... SELECT row counts are only known from an execution plan
        let Some(rows) = node.value_rows else {
            return;
        };
        if self.maximum > 0 && i64::try_from(rows).map_or(true, |rows| rows > self.maximum) {
            self.findings.push(
                Code::InsertTooManyRows,
                line,
                format!(
                    "INSERT into `{}` has {} rows, which exceeds the limit of {}",
                    node.table, rows, self.maximum
                )
            );
        }
    }
}
