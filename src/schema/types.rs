//! Data model shared by policies, templates and advisors.

use std::{fmt, str::FromStr};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{error::ReviewError, syntax::SqlDialect};

/// Component list of a template; no rule type declares more than two
pub type ComponentList = SmallVec<[ComponentConfig; 2]>;

/// Configured level of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleLevel {
    Error,
    Warning,
    Disabled
}

impl RuleLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Disabled => "DISABLED"
        }
    }
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleLevel {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Self::Error),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "DISABLED" => Ok(Self::Disabled),
            _ => Err(ReviewError::UnknownLevel(s.to_string()))
        }
    }
}

/// Grouping of rule types in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleCategory {
    Naming,
    Statement,
    Table,
    Column,
    System
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naming => write!(f, "NAMING"),
            Self::Statement => write!(f, "STATEMENT"),
            Self::Table => write!(f, "TABLE"),
            Self::Column => write!(f, "COLUMN"),
            Self::System => write!(f, "SYSTEM")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NamingFormatPayload {
    pub format:     String,
    /// Zero disables the length check
    #[serde(default)]
    pub max_length: usize
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringArrayLimitPayload {
    pub list: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommentFormatPayload {
    pub required:   bool,
    pub max_length: i64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberValuePayload {
    pub number: i64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringValuePayload {
    pub string: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CasePayload {
    pub upper: bool
}

/// Stored rule parameters.
///
/// The stored form is a plain JSON/YAML object; variants are told apart by
/// their field sets, which are pairwise disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RulePayload {
    NamingFormat(NamingFormatPayload),
    StringArrayLimit(StringArrayLimitPayload),
    CommentFormat(CommentFormatPayload),
    NumberValue(NumberValuePayload),
    StringValue(StringValuePayload),
    Case(CasePayload)
}

impl RulePayload {
    /// Variant name used in error messages
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::NamingFormat(_) => "NamingFormatPayload",
            Self::StringArrayLimit(_) => "StringArrayLimitPayload",
            Self::CommentFormat(_) => "CommentFormatPayload",
            Self::NumberValue(_) => "NumberValuePayload",
            Self::StringValue(_) => "StringValuePayload",
            Self::Case(_) => "CasePayload"
        }
    }
}

/// One enabled check instance, as stored in a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub rule_type: CompactString,
    pub level:     RuleLevel,
    #[serde(alias = "engine")]
    pub dialect:   SqlDialect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload:   Option<RulePayload>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment:   String
}

/// A named, ordered set of rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id:        String,
    #[serde(default)]
    pub enforce:   bool,
    pub name:      String,
    #[serde(default)]
    pub rule_list: Vec<Rule>,
    #[serde(default)]
    pub resources: Vec<String>
}

/// Kind of a typed template parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKind {
    Number,
    String,
    Boolean,
    Template,
    StringArray
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "NUMBER"),
            Self::String => write!(f, "STRING"),
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Template => write!(f, "TEMPLATE"),
            Self::StringArray => write!(f, "STRING_ARRAY")
        }
    }
}

/// Placeholder a TEMPLATE component may reference, e.g. `{{table}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateToken {
    pub id:          CompactString,
    pub description: String
}

/// Typed parameter value: default plus optional current value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentPayload {
    Number {
        default: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value:   Option<i64>
    },
    String {
        default: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value:   Option<String>
    },
    Boolean {
        default: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value:   Option<bool>
    },
    Template {
        default:   String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value:     Option<String>,
        templates: Vec<TemplateToken>
    },
    StringArray {
        default: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value:   Option<Vec<String>>
    }
}

impl ComponentPayload {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Number {
                ..
            } => ComponentKind::Number,
            Self::String {
                ..
            } => ComponentKind::String,
            Self::Boolean {
                ..
            } => ComponentKind::Boolean,
            Self::Template {
                ..
            } => ComponentKind::Template,
            Self::StringArray {
                ..
            } => ComponentKind::StringArray
        }
    }
}

/// Named parameter slot of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub key:     CompactString,
    pub payload: ComponentPayload
}

impl ComponentConfig {
    pub fn number(key: &str, default: i64) -> Self {
        Self {
            key:     key.into(),
            payload: ComponentPayload::Number {
                default,
                value: None
            }
        }
    }

    pub fn string(key: &str, default: &str) -> Self {
        Self {
            key:     key.into(),
            payload: ComponentPayload::String {
                default: default.to_string(),
                value:   None
            }
        }
    }

    pub fn boolean(key: &str, default: bool) -> Self {
        Self {
            key:     key.into(),
            payload: ComponentPayload::Boolean {
                default,
                value: None
            }
        }
    }

    pub fn template(key: &str, default: &str, tokens: &[(&str, &str)]) -> Self {
        Self {
            key:     key.into(),
            payload: ComponentPayload::Template {
                default:   default.to_string(),
                value:     None,
                templates: tokens
                    .iter()
                    .map(|(id, description)| TemplateToken {
                        id:          (*id).into(),
                        description: (*description).to_string()
                    })
                    .collect()
            }
        }
    }

    pub fn string_array(key: &str, default: &[&str]) -> Self {
        Self {
            key:     key.into(),
            payload: ComponentPayload::StringArray {
                default: default.iter().map(|s| s.to_string()).collect(),
                value:   None
            }
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.payload.kind()
    }
}

/// UI-facing, defaulted description of a rule type on one dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTemplate {
    #[serde(rename = "type")]
    pub rule_type:      CompactString,
    pub category:       RuleCategory,
    pub dialect:        SqlDialect,
    pub level:          RuleLevel,
    pub component_list: ComponentList,
    #[serde(default)]
    pub comment:        String
}
