//! The closed catalog of rule types.
//!
//! Every per-type fact (identifier, category, payload shape, dialects,
//! default components) is an exhaustive `match` over [`RuleType`], so adding
//! a variant without filling in each of them does not compile.

use std::{fmt, str::FromStr};

use super::{
    convert::PayloadShape,
    types::{ComponentConfig, ComponentList, RuleCategory, RuleLevel, RuleTemplate}
};
use crate::{error::ReviewError, syntax::SqlDialect};

/// Default naming format: lower snake case
pub const SNAKE_CASE_FORMAT: &str = "^[a-z]+(_[a-z]+)*$";

const DEFAULT_MAX_LENGTH: i64 = 64;

const INDEX_TEMPLATE_TOKENS: [(&str, &str); 2] = [
    ("table", "The table name"),
    ("column_list", "Index column names, joined by _")
];

const MYSQL_FAMILY: &[SqlDialect] = &[SqlDialect::MySQL];
const COMMENT_DIALECTS: &[SqlDialect] = &[SqlDialect::MySQL, SqlDialect::PostgreSQL];

/// Identifier of a rule type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleType {
    NamingTable,
    NamingColumn,
    NamingIndexIdx,
    NamingIndexUk,
    NamingIdentifierCase,
    TableDropNamingConvention,
    TableRequirePk,
    TableComment,
    ColumnRequired,
    ColumnTypeDisallowList,
    ColumnMaximumCharacterLength,
    ColumnComment,
    StatementSelectNoSelectAll,
    StatementWhereRequire,
    StatementWhereNoLeadingWildcardLike,
    StatementMaximumLimitValue,
    StatementInsertMustSpecifyColumn,
    StatementInsertRowLimit,
    StatementQueryMinimumPlanLevel,
    SystemCharsetAllowlist
}

impl RuleType {
    /// The whole catalog, in display order
    pub const ALL: [RuleType; 20] = [
        Self::NamingTable,
        Self::NamingColumn,
        Self::NamingIndexIdx,
        Self::NamingIndexUk,
        Self::NamingIdentifierCase,
        Self::TableDropNamingConvention,
        Self::TableRequirePk,
        Self::TableComment,
        Self::ColumnRequired,
        Self::ColumnTypeDisallowList,
        Self::ColumnMaximumCharacterLength,
        Self::ColumnComment,
        Self::StatementSelectNoSelectAll,
        Self::StatementWhereRequire,
        Self::StatementWhereNoLeadingWildcardLike,
        Self::StatementMaximumLimitValue,
        Self::StatementInsertMustSpecifyColumn,
        Self::StatementInsertRowLimit,
        Self::StatementQueryMinimumPlanLevel,
        Self::SystemCharsetAllowlist
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NamingTable => "naming.table",
            Self::NamingColumn => "naming.column",
            Self::NamingIndexIdx => "naming.index.idx",
            Self::NamingIndexUk => "naming.index.uk",
            Self::NamingIdentifierCase => "naming.identifier.case",
            Self::TableDropNamingConvention => "table.drop-naming-convention",
            Self::TableRequirePk => "table.require-pk",
            Self::TableComment => "table.comment",
            Self::ColumnRequired => "column.required",
            Self::ColumnTypeDisallowList => "column.type-disallow-list",
            Self::ColumnMaximumCharacterLength => "column.maximum-character-length",
            Self::ColumnComment => "column.comment",
            Self::StatementSelectNoSelectAll => "statement.select.no-select-all",
            Self::StatementWhereRequire => "statement.where.require",
            Self::StatementWhereNoLeadingWildcardLike => "statement.where.no-leading-wildcard-like",
            Self::StatementMaximumLimitValue => "statement.maximum-limit-value",
            Self::StatementInsertMustSpecifyColumn => "statement.insert.must-specify-column",
            Self::StatementInsertRowLimit => "statement.insert.row-limit",
            Self::StatementQueryMinimumPlanLevel => "statement.query.minimum-plan-level",
            Self::SystemCharsetAllowlist => "system.charset.allowlist"
        }
    }

    pub fn category(self) -> RuleCategory {
        match self {
            Self::NamingTable
            | Self::NamingColumn
            | Self::NamingIndexIdx
            | Self::NamingIndexUk
            | Self::NamingIdentifierCase => RuleCategory::Naming,
            Self::TableDropNamingConvention | Self::TableRequirePk | Self::TableComment => {
                RuleCategory::Table
            }
            Self::ColumnRequired
            | Self::ColumnTypeDisallowList
            | Self::ColumnMaximumCharacterLength
            | Self::ColumnComment => RuleCategory::Column,
            Self::StatementSelectNoSelectAll
            | Self::StatementWhereRequire
            | Self::StatementWhereNoLeadingWildcardLike
            | Self::StatementMaximumLimitValue
            | Self::StatementInsertMustSpecifyColumn
            | Self::StatementInsertRowLimit
            | Self::StatementQueryMinimumPlanLevel => RuleCategory::Statement,
            Self::SystemCharsetAllowlist => RuleCategory::System
        }
    }

    /// Stored payload shape and the component composition it implies
    pub fn shape(self) -> PayloadShape {
        match self {
            Self::NamingTable | Self::NamingColumn => PayloadShape::NamingFormat,
            Self::NamingIndexIdx | Self::NamingIndexUk => PayloadShape::NamingTemplate,
            Self::NamingIdentifierCase => PayloadShape::Case,
            Self::TableDropNamingConvention => PayloadShape::FormatOnly,
            Self::TableComment | Self::ColumnComment => PayloadShape::CommentFormat,
            Self::ColumnRequired | Self::ColumnTypeDisallowList | Self::SystemCharsetAllowlist => {
                PayloadShape::StringArray
            }
            Self::ColumnMaximumCharacterLength
            | Self::StatementMaximumLimitValue
            | Self::StatementInsertRowLimit => PayloadShape::Number,
            Self::StatementQueryMinimumPlanLevel => PayloadShape::StringValue,
            Self::TableRequirePk
            | Self::StatementSelectNoSelectAll
            | Self::StatementWhereRequire
            | Self::StatementWhereNoLeadingWildcardLike
            | Self::StatementInsertMustSpecifyColumn => PayloadShape::None
        }
    }

    /// Dialects the rule type is offered on
    ///
    /// Rules evaluated on the review tree work on every dialect; the rest
    /// depend on catalog metadata only some engines expose.
    pub fn dialects(self) -> &'static [SqlDialect] {
        match self {
            Self::TableComment | Self::ColumnComment => COMMENT_DIALECTS,
            Self::StatementQueryMinimumPlanLevel | Self::SystemCharsetAllowlist => MYSQL_FAMILY,
            _ => &SqlDialect::ALL
        }
    }

    /// Default component list, in the order the conversions expect
    pub fn default_components(self) -> ComponentList {
        let mut list = ComponentList::new();
        match self {
            Self::NamingTable | Self::NamingColumn => {
                list.push(ComponentConfig::string("format", SNAKE_CASE_FORMAT));
                list.push(ComponentConfig::number("maxLength", DEFAULT_MAX_LENGTH));
            }
            Self::NamingIndexIdx => {
                list.push(ComponentConfig::template(
                    "format",
                    "^$|^idx_{{table}}_{{column_list}}$",
                    &INDEX_TEMPLATE_TOKENS
                ));
                list.push(ComponentConfig::number("maxLength", DEFAULT_MAX_LENGTH));
            }
            Self::NamingIndexUk => {
                list.push(ComponentConfig::template(
                    "format",
                    "^$|^uk_{{table}}_{{column_list}}$",
                    &INDEX_TEMPLATE_TOKENS
                ));
                list.push(ComponentConfig::number("maxLength", DEFAULT_MAX_LENGTH));
            }
            Self::NamingIdentifierCase => {
                list.push(ComponentConfig::boolean("upper", false));
            }
            Self::TableDropNamingConvention => {
                list.push(ComponentConfig::string("format", "_del$"));
            }
            Self::TableComment | Self::ColumnComment => {
                list.push(ComponentConfig::boolean("required", true));
                list.push(ComponentConfig::number("maxLength", DEFAULT_MAX_LENGTH));
            }
            Self::ColumnRequired => {
                list.push(ComponentConfig::string_array(
                    "list",
                    &["id", "created_ts", "updated_ts", "creator_id", "updater_id"]
                ));
            }
            Self::ColumnTypeDisallowList => {
                list.push(ComponentConfig::string_array("list", &["JSON", "BINARY_FLOAT"]));
            }
            Self::SystemCharsetAllowlist => {
                list.push(ComponentConfig::string_array("list", &["utf8mb4"]));
            }
            Self::ColumnMaximumCharacterLength => {
                list.push(ComponentConfig::number("number", 20));
            }
            Self::StatementMaximumLimitValue | Self::StatementInsertRowLimit => {
                list.push(ComponentConfig::number("number", 1000));
            }
            Self::StatementQueryMinimumPlanLevel => {
                list.push(ComponentConfig::string("string", "INDEX"));
            }
            Self::TableRequirePk
            | Self::StatementSelectNoSelectAll
            | Self::StatementWhereRequire
            | Self::StatementWhereNoLeadingWildcardLike
            | Self::StatementInsertMustSpecifyColumn => {}
        }
        list
    }

    /// Schema template with default level and components
    pub fn template(self, dialect: SqlDialect) -> RuleTemplate {
        RuleTemplate {
            rule_type: self.as_str().into(),
            category: self.category(),
            dialect,
            level: RuleLevel::Warning,
            component_list: self.default_components(),
            comment: String::new()
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule_type| rule_type.as_str() == s)
            .ok_or_else(|| ReviewError::UnknownRuleType(s.to_string()))
    }
}

/// Schema templates for every rule type on every dialect it is offered on
pub fn schema_templates() -> Vec<RuleTemplate> {
    RuleType::ALL
        .into_iter()
        .flat_map(|rule_type| {
            rule_type
                .dialects()
                .iter()
                .map(move |dialect| rule_type.template(*dialect))
        })
        .collect()
}
