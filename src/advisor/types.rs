use std::fmt;

use compact_str::CompactString;
use serde::Serialize;

use crate::{
    error::{ReviewError, ReviewResult},
    schema::{Rule, RuleLevel},
    syntax::SyntaxTree
};

/// Outcome of a single finding.
///
/// Ordered from lowest to highest so the worst status of a report is its
/// maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Success,
    Warning,
    Error
}

impl Status {
    /// Map a configured rule level to the status of its findings
    ///
    /// # Errors
    ///
    /// `Disabled` rules never run, so their level has no status.
    pub fn from_rule_level(rule_type: &str, level: RuleLevel) -> ReviewResult<Self> {
        match level {
            RuleLevel::Error => Ok(Self::Error),
            RuleLevel::Warning => Ok(Self::Warning),
            RuleLevel::Disabled => Err(ReviewError::UnusableLevel {
                rule_type: rule_type.to_string(),
                level:     level.to_string()
            })
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR")
        }
    }
}

/// Machine-readable finding code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    Ok,
    StatementSelectAll,
    StatementNoWhere,
    StatementLeadingWildcardLike,
    StatementExceedMaximumLimitValue,
    InsertNotSpecifyColumn,
    InsertTooManyRows,
    NamingTableConventionMismatch,
    NamingColumnConventionMismatch,
    NamingIndexConventionMismatch,
    NamingUkConventionMismatch,
    NamingCaseMismatch,
    TableNoPk,
    TableDropNamingConventionMismatch,
    NoRequiredColumn,
    DisabledColumnType,
    CharLengthExceedsLimit
}

impl Code {
    /// Numeric code, grouped by rule category
    pub fn number(self) -> u32 {
        match self {
            Self::Ok => 0,
            Self::StatementSelectAll => 203,
            Self::StatementNoWhere => 202,
            Self::StatementLeadingWildcardLike => 204,
            Self::StatementExceedMaximumLimitValue => 222,
            Self::InsertNotSpecifyColumn => 1107,
            Self::InsertTooManyRows => 1101,
            Self::NamingTableConventionMismatch => 301,
            Self::NamingColumnConventionMismatch => 302,
            Self::NamingIndexConventionMismatch => 303,
            Self::NamingUkConventionMismatch => 304,
            Self::NamingCaseMismatch => 308,
            Self::TableNoPk => 601,
            Self::TableDropNamingConventionMismatch => 603,
            Self::NoRequiredColumn => 401,
            Self::DisabledColumnType => 403,
            Self::CharLengthExceedsLimit => 415
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::StatementSelectAll => "STATEMENT_SELECT_ALL",
            Self::StatementNoWhere => "STATEMENT_NO_WHERE",
            Self::StatementLeadingWildcardLike => "STATEMENT_LEADING_WILDCARD_LIKE",
            Self::StatementExceedMaximumLimitValue => "STATEMENT_EXCEED_MAXIMUM_LIMIT_VALUE",
            Self::InsertNotSpecifyColumn => "INSERT_NOT_SPECIFY_COLUMN",
            Self::InsertTooManyRows => "INSERT_TOO_MANY_ROWS",
            Self::NamingTableConventionMismatch => "NAMING_TABLE_CONVENTION_MISMATCH",
            Self::NamingColumnConventionMismatch => "NAMING_COLUMN_CONVENTION_MISMATCH",
            Self::NamingIndexConventionMismatch => "NAMING_INDEX_CONVENTION_MISMATCH",
            Self::NamingUkConventionMismatch => "NAMING_UK_CONVENTION_MISMATCH",
            Self::NamingCaseMismatch => "NAMING_CASE_MISMATCH",
            Self::TableNoPk => "TABLE_NO_PK",
            Self::TableDropNamingConventionMismatch => "TABLE_DROP_NAMING_CONVENTION_MISMATCH",
            Self::NoRequiredColumn => "NO_REQUIRED_COLUMN",
            Self::DisabledColumnType => "DISABLED_COLUMN_TYPE",
            Self::CharLengthExceedsLimit => "CHAR_LENGTH_EXCEEDS_LIMIT"
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One result of running an advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub status:  Status,
    pub code:    Code,
    /// Rule type that produced the finding, `OK` for the success placeholder
    pub title:   String,
    pub content: String,
    /// 1-based line of the offending statement, 0 when there is none
    pub line:    usize
}

impl Finding {
    /// Placeholder returned when a rule found nothing
    pub fn ok() -> Self {
        Self {
            status:  Status::Success,
            code:    Code::Ok,
            title:   "OK".to_string(),
            content: String::new(),
            line:    0
        }
    }
}

/// Input of a single advisor run
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub tree:      &'a SyntaxTree,
    /// SQL text the tree was parsed from
    pub statement: &'a str,
    pub rule:      &'a Rule
}

/// Findings of one evaluated rule
#[derive(Debug, Clone, Serialize)]
pub struct RuleFindings {
    #[serde(rename = "type")]
    pub rule_type: CompactString,
    pub level:     RuleLevel,
    pub findings:  Vec<Finding>
}

/// Result of reviewing SQL text against a whole policy.
///
/// Use [`error_count`](Self::error_count) and
/// [`warning_count`](Self::warning_count) to get counts by status.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReport {
    /// Per-rule findings, in policy order
    pub results:          Vec<RuleFindings>,
    /// Number of statements in the reviewed text
    pub statements_count: usize,
    /// Number of rules that were evaluated
    pub rules_count:      usize,
    /// Enabled rules that were skipped (no advisor for the dialect)
    pub skipped:          Vec<CompactString>
}

impl ReviewReport {
    pub fn new(statements_count: usize) -> Self {
        Self {
            results: Vec::new(),
            statements_count,
            rules_count: 0,
            skipped: Vec::new()
        }
    }

    pub fn add_result(&mut self, result: RuleFindings) {
        self.rules_count += 1;
        self.results.push(result);
    }

    /// Every finding, success placeholders excluded
    pub fn violations(&self) -> impl Iterator<Item = &Finding> {
        self.results
            .iter()
            .flat_map(|r| r.findings.iter())
            .filter(|f| f.status != Status::Success)
    }

    pub fn error_count(&self) -> usize {
        self.violations()
            .filter(|f| f.status == Status::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations()
            .filter(|f| f.status == Status::Warning)
            .count()
    }

    /// Worst status over all findings
    pub fn highest_status(&self) -> Status {
        self.violations()
            .map(|f| f.status)
            .max()
            .unwrap_or(Status::Success)
    }
}
