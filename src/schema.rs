//! Rule configuration schema.
//!
//! Defines the catalog of rule types, their typed parameter components and
//! the conversion between the compact stored form ([`Rule`]) and the UI-facing
//! form ([`RuleTemplate`]).
//!
//! # Example
//!
//! ```
//! use sql_review::{
//!     schema::{RuleLevel, builtin_catalog, policy_rule_to_template, template_to_policy_rule},
//!     syntax::SqlDialect
//! };
//!
//! let catalog = builtin_catalog().unwrap();
//! let template = catalog.template("naming.table", SqlDialect::MsSql).unwrap();
//!
//! let mut rule = template_to_policy_rule(template).unwrap();
//! rule.level = RuleLevel::Error;
//!
//! let overlaid = policy_rule_to_template(&rule, template).unwrap();
//! assert_eq!(overlaid.level, RuleLevel::Error);
//! assert_eq!(template_to_policy_rule(&overlaid).unwrap(), rule);
//! ```

mod catalog;
mod convert;
mod preset;
mod types;

pub use catalog::{RuleType, SNAKE_CASE_FORMAT, schema_templates};
pub use convert::{Conversion, PayloadShape, policy_rule_to_template, template_to_policy_rule};
pub use preset::{PresetEntry, TemplateCatalog, builtin_catalog};
pub use types::{
    CasePayload, CommentFormatPayload, ComponentConfig, ComponentKind, ComponentList,
    ComponentPayload, NamingFormatPayload, NumberValuePayload, Policy, Rule, RuleCategory,
    RuleLevel, RulePayload, RuleTemplate, StringArrayLimitPayload, StringValuePayload,
    TemplateToken
};
