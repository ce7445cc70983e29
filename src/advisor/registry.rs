use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use super::{
    Advisor,
    column::{MaximumCharacterLength, RequiredColumns, TypeDisallowList},
    naming::{IdentifierCase, IndexKind, NamingColumn, NamingIndex, NamingTable},
    statement::{
        InsertMustSpecifyColumn, InsertRowLimit, MaximumLimitValue, NoLeadingWildcardLike,
        NoSelectAll, RequireWhere
    },
    table::{DropNamingConvention, RequirePrimaryKey}
};
use crate::{
    error::{ReviewError, ReviewResult},
    schema::RuleType,
    syntax::SqlDialect
};

/// Immutable map from (dialect, rule type) to the advisor that checks it.
///
/// Built once before any check and shared by reference afterwards.
///
/// # Example
///
/// ```
/// use sql_review::{advisor::AdvisorRegistry, schema::RuleType, syntax::SqlDialect};
///
/// let registry = AdvisorRegistry::builtin().unwrap();
///
/// assert!(registry.lookup(SqlDialect::MsSql, RuleType::NamingTable).is_some());
/// assert!(registry.lookup(SqlDialect::MySQL, RuleType::TableComment).is_none());
/// ```
#[derive(Default)]
pub struct AdvisorRegistry {
    advisors: IndexMap<(SqlDialect, RuleType), Arc<dyn Advisor>>
}

impl AdvisorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in advisor on every dialect it is offered on
    ///
    /// # Errors
    ///
    /// Fails if two built-in advisors claim the same pair.
    pub fn builtin() -> ReviewResult<Self> {
        let mut registry = Self::new();
        for rule_type in RuleType::ALL {
            let Some(advisor) = advisor_for(rule_type) else {
                debug!(rule = %rule_type, "rule type has no advisor");
                continue;
            };
            for dialect in rule_type.dialects() {
                registry.register(*dialect, rule_type, Arc::clone(&advisor))?;
            }
        }
        debug!(advisors = registry.len(), "advisor registry built");
        Ok(registry)
    }

    /// # Errors
    ///
    /// Fails with [`ReviewError::DuplicateAdvisor`] if the pair is taken.
    pub fn register(
        &mut self,
        dialect: SqlDialect,
        rule_type: RuleType,
        advisor: Arc<dyn Advisor>
    ) -> ReviewResult<()> {
        if self.advisors.contains_key(&(dialect, rule_type)) {
            return Err(ReviewError::DuplicateAdvisor {
                dialect:   dialect.to_string(),
                rule_type: rule_type.to_string()
            });
        }
        self.advisors.insert((dialect, rule_type), advisor);
        Ok(())
    }

    pub fn lookup(&self, dialect: SqlDialect, rule_type: RuleType) -> Option<&dyn Advisor> {
        self.advisors
            .get(&(dialect, rule_type))
            .map(|advisor| advisor.as_ref())
    }

    pub fn len(&self) -> usize {
        self.advisors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advisors.is_empty()
    }
}

/// Built-in advisor of a rule type, if it can be checked on a review tree
fn advisor_for(rule_type: RuleType) -> Option<Arc<dyn Advisor>> {
    let advisor: Arc<dyn Advisor> = match rule_type {
        RuleType::NamingTable => Arc::new(NamingTable),
        RuleType::NamingColumn => Arc::new(NamingColumn),
        RuleType::NamingIndexIdx => Arc::new(NamingIndex::new(IndexKind::Plain)),
        RuleType::NamingIndexUk => Arc::new(NamingIndex::new(IndexKind::Unique)),
        RuleType::NamingIdentifierCase => Arc::new(IdentifierCase),
        RuleType::TableDropNamingConvention => Arc::new(DropNamingConvention),
        RuleType::TableRequirePk => Arc::new(RequirePrimaryKey),
        RuleType::ColumnRequired => Arc::new(RequiredColumns),
        RuleType::ColumnTypeDisallowList => Arc::new(TypeDisallowList),
        RuleType::ColumnMaximumCharacterLength => Arc::new(MaximumCharacterLength),
        RuleType::StatementSelectNoSelectAll => Arc::new(NoSelectAll),
        RuleType::StatementWhereRequire => Arc::new(RequireWhere),
        RuleType::StatementWhereNoLeadingWildcardLike => Arc::new(NoLeadingWildcardLike),
        RuleType::StatementMaximumLimitValue => Arc::new(MaximumLimitValue),
        RuleType::StatementInsertMustSpecifyColumn => Arc::new(InsertMustSpecifyColumn),
        RuleType::StatementInsertRowLimit => Arc::new(InsertRowLimit),
        // Need table metadata or execution plans
        RuleType::TableComment
        | RuleType::ColumnComment
        | RuleType::StatementQueryMinimumPlanLevel
        | RuleType::SystemCharsetAllowlist => return None
    };
    Some(advisor)
}
