//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-review.toml` in current directory
//! 4. `~/.config/sql-review/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [review]
//! preset = "prod"              # sample, dev, prod
//! dialect = "mssql"
//! disabled = ["statement.select.no-select-all"]
//!
//! [review.level]
//! "naming.table" = "warning"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_REVIEW_PRESET` | Default preset name |
//! | `SQL_REVIEW_DIALECT` | Default SQL dialect |

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{AppResult, config_error},
    schema::{Policy, RuleLevel}
};

/// Preset used when neither the command line nor configuration names one
pub const DEFAULT_PRESET: &str = "sample";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub review: ReviewConfig
}

/// Review defaults and policy adjustments
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReviewConfig {
    /// Built-in preset used when no policy file is given
    pub preset:   Option<String>,
    /// SQL dialect used when none is given on the command line
    pub dialect:  Option<String>,
    /// Rule types to disable
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Level overrides (rule type -> level)
    #[serde(default)]
    pub level:    HashMap<String, String>
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-review.toml)
    /// 3. Config file in home directory (~/.config/sql-review/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-review")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Current directory config replaces the home config
        let local_config = PathBuf::from(".sql-review.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Ok(preset) = env::var("SQL_REVIEW_PRESET") {
            config.review.preset = Some(preset);
        }

        if let Ok(dialect) = env::var("SQL_REVIEW_DIALECT") {
            config.review.dialect = Some(dialect);
        }

        Ok(config)
    }

    /// Load configuration from one TOML file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        let config = toml::from_str(&content)
            .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

impl ReviewConfig {
    /// Apply disabled rules and level overrides to a policy
    ///
    /// Rule types are matched case-insensitively. Overrides naming rule types
    /// absent from the policy are ignored.
    ///
    /// # Errors
    ///
    /// Fails if an override names an unknown level.
    pub fn apply(&self, policy: &mut Policy) -> AppResult<()> {
        let mut levels = Vec::with_capacity(self.level.len());
        for (rule_type, level) in &self.level {
            let level: RuleLevel = level.parse()?;
            levels.push((rule_type.as_str(), level));
        }
        for rule in &mut policy.rule_list {
            if let Some((_, level)) = levels
                .iter()
                .find(|(rule_type, _)| rule_type.eq_ignore_ascii_case(&rule.rule_type))
            {
                rule.level = *level;
            }
            if self
                .disabled
                .iter()
                .any(|d| d.eq_ignore_ascii_case(&rule.rule_type))
            {
                rule.level = RuleLevel::Disabled;
            }
        }
        Ok(())
    }
}
