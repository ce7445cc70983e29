//! Naming convention advisors.

use tracing::error;

use super::{
    Advisor,
    support::{
        FindingList, NamingFormat, compile, naming_format, naming_payload, normalize_identifier,
        unwrap_string_literal, upper_case
    },
    types::{Code, Context, Finding}
};
use crate::{
    error::ReviewResult,
    syntax::{Argument, CreateIndex, CreateTable, NodeVisitor, ProcedureCall, RenameTable}
};

const RENAME_PROCEDURE: &str = "sp_rename";

/// Table names must match the configured format and length.
///
/// Checks declared names of created tables, the target of
/// `RENAME TABLE a TO b`, and the new name passed to `sp_rename`.
pub struct NamingTable;

impl Advisor for NamingTable {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = NamingTableVisitor {
            format:   naming_format(ctx)?,
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct NamingTableVisitor {
    format:   NamingFormat,
    findings: FindingList
}

impl NamingTableVisitor {
    fn check_name(&mut self, line: usize, name: &str) {
        if !self.format.matches(name) {
            self.findings.push(
                Code::NamingTableConventionMismatch,
                line,
                format!(
                    "{} mismatches table naming convention, naming format should be {:?}",
                    name, self.format.pattern
                )
            );
        }
        if self.format.exceeds_length(name) {
            self.findings.push(
                Code::NamingTableConventionMismatch,
                line,
                format!(
                    "{} mismatches table naming convention, its length should be within {} characters",
                    name, self.format.max_length
                )
            );
        }
    }
}

impl NodeVisitor for NamingTableVisitor {
    fn visit_create_table(&mut self, line: usize, node: &CreateTable) {
        self.check_name(line, node.name.object_name());
    }

    fn visit_rename_table(&mut self, line: usize, node: &RenameTable) {
        self.check_name(line, node.new_name.object_name());
    }

    fn visit_procedure_call(&mut self, line: usize, node: &ProcedureCall) {
        let Some(name) = &node.name else {
            return;
        };
        if name.is_qualified() {
            return;
        }
        let Some(procedure) = name.object() else {
            return;
        };
        let procedure = match normalize_identifier(procedure) {
            Ok(procedure) => procedure,
            Err(e) => {
                error!(line, error = %e, "failed to normalize procedure name");
                return;
            }
        };
        if procedure != RENAME_PROCEDURE {
            return;
        }
        let [Argument::StringLiteral(_), Argument::StringLiteral(new_name)] =
            node.arguments.as_slice()
        else {
            return;
        };
        let new_name = unwrap_string_literal(new_name).to_string();
        self.check_name(line, &new_name);
    }
}

/// Column names of created tables must match the configured format and length
pub struct NamingColumn;

impl Advisor for NamingColumn {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = NamingColumnVisitor {
            format:   naming_format(ctx)?,
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct NamingColumnVisitor {
    format:   NamingFormat,
    findings: FindingList
}

impl NodeVisitor for NamingColumnVisitor {
    fn visit_create_table(&mut self, line: usize, node: &CreateTable) {
        let table = node.name.object_name();
        for column in &node.columns {
            let name = column.name.value.as_str();
            if !self.format.matches(name) {
                self.findings.push(
                    Code::NamingColumnConventionMismatch,
                    line,
                    format!(
                        "`{}`.`{}` mismatches column naming convention, naming format should be {:?}",
                        table, name, self.format.pattern
                    )
                );
            }
            if self.format.exceeds_length(name) {
                self.findings.push(
                    Code::NamingColumnConventionMismatch,
                    line,
                    format!(
                        "`{}`.`{}` mismatches column naming convention, its length should be within {} characters",
                        table, name, self.format.max_length
                    )
                );
            }
        }
    }
}

/// Which indexes a [`NamingIndex`] advisor checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Plain indexes (`naming.index.idx`)
    Plain,
    /// Unique indexes (`naming.index.uk`)
    Unique
}

/// Index names must match a template built from table and column names.
///
/// The format may reference `{{table}}` and `{{column_list}}` (column names
/// joined by `_`); both are substituted literally before matching.
pub struct NamingIndex {
    kind: IndexKind
}

impl NamingIndex {
    pub fn new(kind: IndexKind) -> Self {
        Self {
            kind
        }
    }
}

impl Advisor for NamingIndex {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let payload = naming_payload(ctx)?;
        let mut collector = IndexCollector {
            unique:  self.kind == IndexKind::Unique,
            indexes: Vec::new()
        };
        ctx.tree.walk(&mut collector);

        let code = match self.kind {
            IndexKind::Plain => Code::NamingIndexConventionMismatch,
            IndexKind::Unique => Code::NamingUkConventionMismatch
        };
        let mut findings = FindingList::new(ctx)?;
        for (line, index) in collector.indexes {
            let table = index.table.object_name();
            let name = index
                .name
                .as_ref()
                .map(|n| n.object_name())
                .unwrap_or_default();
            let expected = payload
                .format
                .replace("{{table}}", &regex::escape(table))
                .replace("{{column_list}}", &regex::escape(&index.columns.join("_")));
            let regex = compile(&payload.format, &format!("^(?:{})$", expected))?;
            if !regex.is_match(name) {
                findings.push(
                    code,
                    line,
                    format!(
                        "Index in table `{}` mismatches the naming convention, expect {:?} but found `{}`",
                        table, expected, name
                    )
                );
            }
            if payload.max_length > 0 && name.chars().count() > payload.max_length {
                findings.push(
                    code,
                    line,
                    format!(
                        "Index `{}` in table `{}` mismatches the naming convention, its length should be within {} characters",
                        name, table, payload.max_length
                    )
                );
            }
        }
        Ok(findings.finish())
    }
}

struct IndexCollector {
    unique:  bool,
    indexes: Vec<(usize, CreateIndex)>
}

impl NodeVisitor for IndexCollector {
    fn visit_create_index(&mut self, line: usize, node: &CreateIndex) {
        if node.unique == self.unique {
            self.indexes.push((line, node.clone()));
        }
    }
}

/// Table and column identifiers must use one letter case
pub struct IdentifierCase;

impl Advisor for IdentifierCase {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = IdentifierCaseVisitor {
            upper:    upper_case(ctx)?,
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct IdentifierCaseVisitor {
    upper:    bool,
    findings: FindingList
}

impl IdentifierCaseVisitor {
    fn check(&mut self, line: usize, name: &str) {
        let (expected, case) = if self.upper {
            (name.to_uppercase(), "upper")
        } else {
            (name.to_lowercase(), "lower")
        };
        if expected != name {
            self.findings.push(
                Code::NamingCaseMismatch,
                line,
                format!("Identifier {:?} should be {} case", name, case)
            );
        }
    }
}

impl NodeVisitor for IdentifierCaseVisitor {
    fn visit_create_table(&mut self, line: usize, node: &CreateTable) {
        self.check(line, node.name.object_name());
        for column in &node.columns {
            self.check(line, &column.name.value);
        }
    }
}
