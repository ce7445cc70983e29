use super::{
    Advisor,
    support::{FindingList, NamingFormat, search_format},
    types::{Code, Context, Finding}
};
use crate::{
    error::ReviewResult,
    syntax::{CreateTable, DropTable, NodeVisitor}
};

/// Only tables whose name carries the configured marker may be dropped
pub struct DropNamingConvention;

impl Advisor for DropNamingConvention {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = DropNamingVisitor {
            format:   search_format(ctx)?,
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct DropNamingVisitor {
    format:   NamingFormat,
    findings: FindingList
}

impl NodeVisitor for DropNamingVisitor {
    fn visit_drop_table(&mut self, line: usize, node: &DropTable) {
        for name in &node.names {
            let table = name.object_name();
            if !self.format.matches(table) {
                self.findings.push(
                    Code::TableDropNamingConventionMismatch,
                    line,
                    format!(
                        "`{}` mismatches drop table naming convention, naming format should be {:?}",
                        table, self.format.pattern
                    )
                );
            }
        }
    }
}

/// Created tables must declare a primary key
pub struct RequirePrimaryKey;

impl Advisor for RequirePrimaryKey {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = RequirePrimaryKeyVisitor {
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct RequirePrimaryKeyVisitor {
    findings: FindingList
}

impl NodeVisitor for RequirePrimaryKeyVisitor {
    fn visit_create_table(&mut self, line: usize, node: &CreateTable) {
        if !node.has_primary_key {
            self.findings.push(
                Code::TableNoPk,
                line,
                format!("Table `{}` requires PRIMARY KEY", node.name.object_name())
            );
        }
    }
}
