//! Built-in rule presets and the process-wide template catalog.
//!
//! The catalog is the schema (every rule type on every dialect it supports,
//! with default values) plus one template list per named preset. It is built
//! once, on first use, and never mutated afterwards.

use std::sync::LazyLock;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use super::{
    catalog::{RuleType, schema_templates},
    convert::{policy_rule_to_template, template_to_policy_rule},
    types::{Policy, Rule, RuleLevel, RulePayload, RuleTemplate}
};
use crate::{
    error::{ReviewError, ReviewResult},
    syntax::SqlDialect
};

/// Built-in presets, in display order
const PRESETS: [(&str, &str); 3] = [
    ("sample", include_str!("presets/sample.yaml")),
    ("dev", include_str!("presets/dev.yaml")),
    ("prod", include_str!("presets/prod.yaml"))
];

static CATALOG: LazyLock<ReviewResult<TemplateCatalog>> = LazyLock::new(TemplateCatalog::build);

/// One preset line: a rule type with level and payload overrides
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetEntry {
    #[serde(rename = "type")]
    pub rule_type: CompactString,
    pub level:     RuleLevel,
    /// Restrict the entry to one dialect; all supported dialects otherwise
    #[serde(default)]
    pub dialect:   Option<SqlDialect>,
    #[serde(default)]
    pub payload:   Option<RulePayload>
}

/// Immutable catalog of rule templates
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    schema:  Vec<RuleTemplate>,
    presets: IndexMap<&'static str, Vec<RuleTemplate>>
}

/// Shared catalog built from the embedded presets
///
/// # Errors
///
/// Returns the build error if an embedded preset is invalid.
pub fn builtin_catalog() -> ReviewResult<&'static TemplateCatalog> {
    CATALOG.as_ref().map_err(Clone::clone)
}

impl TemplateCatalog {
    /// Build the schema and overlay every built-in preset onto it
    pub fn build() -> ReviewResult<Self> {
        let mut catalog = Self {
            schema:  schema_templates(),
            presets: IndexMap::new()
        };
        for (name, content) in PRESETS {
            let entries: Vec<PresetEntry> =
                serde_yaml::from_str(content).map_err(|e| ReviewError::InvalidPreset {
                    name:    name.to_string(),
                    message: e.to_string()
                })?;
            let templates = catalog.overlay_preset(name, &entries)?;
            debug!(preset = name, templates = templates.len(), "loaded rule preset");
            catalog.presets.insert(name, templates);
        }
        Ok(catalog)
    }

    fn overlay_preset(
        &self,
        name: &str,
        entries: &[PresetEntry]
    ) -> ReviewResult<Vec<RuleTemplate>> {
        let mut templates = Vec::new();
        for entry in entries {
            let rule_type: RuleType = entry.rule_type.parse()?;
            let dialects: Vec<SqlDialect> = match entry.dialect {
                Some(dialect) if rule_type.dialects().contains(&dialect) => vec![dialect],
                Some(dialect) => {
                    return Err(ReviewError::InvalidPreset {
                        name:    name.to_string(),
                        message: format!("{} is not offered on {}", rule_type, dialect)
                    });
                }
                None => rule_type.dialects().to_vec()
            };
            for dialect in dialects {
                let rule = Rule {
                    rule_type: entry.rule_type.clone(),
                    level: entry.level,
                    dialect,
                    payload: entry.payload.clone(),
                    comment: String::new()
                };
                let template = self.template(&rule.rule_type, dialect)?;
                templates.push(policy_rule_to_template(&rule, template)?);
            }
        }
        Ok(templates)
    }

    /// All schema templates with their default values
    pub fn schema(&self) -> &[RuleTemplate] {
        &self.schema
    }

    /// Schema template of a rule type on a dialect
    ///
    /// # Errors
    ///
    /// Fails if the rule type is unknown or not offered on `dialect`.
    pub fn template(&self, rule_type: &str, dialect: SqlDialect) -> ReviewResult<&RuleTemplate> {
        let known: RuleType = rule_type.parse()?;
        self.schema
            .iter()
            .find(|t| t.rule_type == rule_type && t.dialect == dialect)
            .ok_or_else(|| ReviewError::TemplateNotFound {
                dialect:   dialect.to_string(),
                rule_type: known.to_string()
            })
    }

    /// Names of the built-in presets
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().copied()
    }

    /// Templates of a named preset
    pub fn preset(&self, name: &str) -> ReviewResult<&[RuleTemplate]> {
        self.presets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ReviewError::UnknownPreset(name.to_string()))
    }

    /// Stored policy seeded from a preset, restricted to one dialect
    pub fn preset_policy(&self, name: &str, dialect: SqlDialect) -> ReviewResult<Policy> {
        let rule_list = self
            .preset(name)?
            .iter()
            .filter(|t| t.dialect == dialect)
            .map(template_to_policy_rule)
            .collect::<ReviewResult<Vec<_>>>()?;
        Ok(Policy {
            id: format!("preset/{}", name),
            enforce: true,
            name: format!("{} SQL review policy", name),
            rule_list,
            resources: Vec::new()
        })
    }
}
