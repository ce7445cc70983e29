use super::{
    Advisor,
    support::{FindingList, number_value, string_list},
    types::{Code, Context, Finding}
};
use crate::{
    error::ReviewResult,
    syntax::{CreateTable, NodeVisitor}
};

/// Created tables must contain every configured column
pub struct RequiredColumns;

impl Advisor for RequiredColumns {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = RequiredColumnsVisitor {
            required: string_list(ctx)?,
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct RequiredColumnsVisitor<'a> {
    required: &'a [String],
    findings: FindingList
}

impl NodeVisitor for RequiredColumnsVisitor<'_> {
    fn visit_create_table(&mut self, line: usize, node: &CreateTable) {
        let missing: Vec<&str> = self
            .required
            .iter()
            .filter(|required| !node.columns.iter().any(|c| c.name.value == **required))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            self.findings.push(
                Code::NoRequiredColumn,
                line,
                format!(
                    "Table `{}` requires columns: {}",
                    node.name.object_name(),
                    missing.join(", ")
                )
            );
        }
    }
}

/// Columns must not use a disallowed data type
pub struct TypeDisallowList;

impl Advisor for TypeDisallowList {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = TypeDisallowVisitor {
            disallowed: string_list(ctx)?
                .iter()
                .map(|t| t.to_ascii_uppercase())
                .collect(),
            findings:   FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct TypeDisallowVisitor {
    disallowed: Vec<String>,
    findings:   FindingList
}

impl NodeVisitor for TypeDisallowVisitor {
    fn visit_create_table(&mut self, line: usize, node: &CreateTable) {
        for column in &node.columns {
            let base = base_type(&column.data_type);
            if self.disallowed.iter().any(|t| *t == base) {
                self.findings.push(
                    Code::DisabledColumnType,
                    line,
                    format!(
                        "Disallow column type {} but column `{}`.`{}` is",
                        base,
                        node.name.object_name(),
                        column.name.value
                    )
                );
            }
        }
    }
}

/// `CHAR` columns longer than the limit should be `VARCHAR`
pub struct MaximumCharacterLength;

impl Advisor for MaximumCharacterLength {
    fn check(&self, ctx: &Context<'_>) -> ReviewResult<Vec<Finding>> {
        let mut visitor = CharLengthVisitor {
            limit:    number_value(ctx)?,
            findings: FindingList::new(ctx)?
        };
        ctx.tree.walk(&mut visitor);
        Ok(visitor.findings.finish())
    }
}

struct CharLengthVisitor {
    limit:    i64,
    findings: FindingList
}

impl NodeVisitor for CharLengthVisitor {
    fn visit_create_table(&mut self, line: usize, node: &CreateTable) {
        if self.limit <= 0 {
            return;
        }
        for column in &node.columns {
            if let Some(length) = char_length(&column.data_type)
                && length > self.limit
            {
                self.findings.push(
                    Code::CharLengthExceedsLimit,
                    line,
                    format!(
                        "The length of the CHAR column `{}`.`{}` is bigger than {}, please use VARCHAR instead",
                        node.name.object_name(),
                        column.name.value,
                        self.limit
                    )
                );
            }
        }
    }
}

/// Type name without arguments, upper-cased: `varchar(20)` becomes `VARCHAR`
fn base_type(data_type: &str) -> String {
    data_type
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_uppercase()
}

/// Declared length of a fixed-width character type
fn char_length(data_type: &str) -> Option<i64> {
    let base = base_type(data_type);
    if !matches!(base.as_str(), "CHAR" | "CHARACTER" | "NCHAR") {
        return None;
    }
    let args = data_type.split_once('(')?.1;
    let digits: String = args.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
