//! Helpers shared by the built-in advisors.

use regex::Regex;

use super::types::{Code, Context, Finding, Status};
use crate::{
    error::{ReviewError, ReviewResult},
    schema::{NamingFormatPayload, Rule, RulePayload},
    syntax::Identifier
};

/// Collects findings of one advisor run.
///
/// Status and title are fixed when the run starts; [`finish`](Self::finish)
/// returns the success placeholder if nothing was reported.
pub struct FindingList {
    status:   Status,
    title:    String,
    findings: Vec<Finding>
}

impl FindingList {
    /// # Errors
    ///
    /// Fails if the rule level cannot produce findings.
    pub fn new(ctx: &Context<'_>) -> ReviewResult<Self> {
        let rule = ctx.rule;
        Ok(Self {
            status:   Status::from_rule_level(&rule.rule_type, rule.level)?,
            title:    rule.rule_type.to_string(),
            findings: Vec::new()
        })
    }

    pub fn push(&mut self, code: Code, line: usize, content: String) {
        self.findings.push(Finding {
            status: self.status,
            code,
            title: self.title.clone(),
            content,
            line
        });
    }

    pub fn finish(self) -> Vec<Finding> {
        if self.findings.is_empty() {
            vec![Finding::ok()]
        } else {
            self.findings
        }
    }
}

/// Naming payload compiled for matching
pub struct NamingFormat {
    /// Pattern as configured, used in messages
    pub pattern:    String,
    pub regex:      Regex,
    /// Zero disables the length check
    pub max_length: usize
}

impl NamingFormat {
    /// Whether the whole of `name` matches the pattern
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Whether `name` is longer than the configured limit.
    ///
    /// Length is counted in Unicode scalar values rather than UTF-8 bytes, so
    /// `заказы` has length 6 even though it takes 12 bytes.
    pub fn exceeds_length(&self, name: &str) -> bool {
        self.max_length > 0 && name.chars().count() > self.max_length
    }
}

/// # Errors
///
/// Fails unless the payload is a `NamingFormatPayload`.
pub fn naming_payload<'a>(ctx: &Context<'a>) -> ReviewResult<&'a NamingFormatPayload> {
    let rule: &'a Rule = ctx.rule;
    match &rule.payload {
        Some(RulePayload::NamingFormat(payload)) => Ok(payload),
        _ => Err(payload_mismatch(ctx, "NamingFormatPayload"))
    }
}

/// Read a naming payload whose format must match the whole name
///
/// # Errors
///
/// Fails on a payload of another variant or an invalid pattern.
pub fn naming_format(ctx: &Context<'_>) -> ReviewResult<NamingFormat> {
    let payload = naming_payload(ctx)?;
    Ok(NamingFormat {
        pattern:    payload.format.clone(),
        regex:      compile(&payload.format, &format!("^(?:{})$", payload.format))?,
        max_length: payload.max_length
    })
}

/// Read a naming payload whose format is searched anywhere in the name
///
/// # Errors
///
/// Fails on a payload of another variant or an invalid pattern.
pub fn search_format(ctx: &Context<'_>) -> ReviewResult<NamingFormat> {
    let payload = naming_payload(ctx)?;
    Ok(NamingFormat {
        pattern:    payload.format.clone(),
        regex:      compile(&payload.format, &payload.format)?,
        max_length: payload.max_length
    })
}

/// Compile `source`, reporting errors against the configured `pattern`
pub fn compile(pattern: &str, source: &str) -> ReviewResult<Regex> {
    Regex::new(source).map_err(|e| ReviewError::InvalidFormat {
        pattern: pattern.to_string(),
        message: e.to_string()
    })
}

/// # Errors
///
/// Fails unless the payload is a `NumberValuePayload`.
pub fn number_value(ctx: &Context<'_>) -> ReviewResult<i64> {
    match &ctx.rule.payload {
        Some(RulePayload::NumberValue(payload)) => Ok(payload.number),
        _ => Err(payload_mismatch(ctx, "NumberValuePayload"))
    }
}

/// # Errors
///
/// Fails unless the payload is a `StringArrayLimitPayload`.
pub fn string_list<'a>(ctx: &Context<'a>) -> ReviewResult<&'a [String]> {
    let rule: &'a Rule = ctx.rule;
    match &rule.payload {
        Some(RulePayload::StringArrayLimit(payload)) => Ok(&payload.list),
        _ => Err(payload_mismatch(ctx, "StringArrayLimitPayload"))
    }
}

/// # Errors
///
/// Fails unless the payload is a `CasePayload`.
pub fn upper_case(ctx: &Context<'_>) -> ReviewResult<bool> {
    match &ctx.rule.payload {
        Some(RulePayload::Case(payload)) => Ok(payload.upper),
        _ => Err(payload_mismatch(ctx, "CasePayload"))
    }
}

fn payload_mismatch(ctx: &Context<'_>, expected: &'static str) -> ReviewError {
    ReviewError::PayloadMismatch {
        rule_type: ctx.rule.rule_type.to_string(),
        expected
    }
}

/// Strip one pair of surrounding single quotes, if both are present
pub fn unwrap_string_literal(raw: &str) -> &str {
    raw.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(raw)
}

/// Identifier could not be resolved to a name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier {0} resolves to an empty name")]
pub struct UnresolvedIdentifier(pub String);

/// Resolve an identifier the way the server compares it.
///
/// Delimited identifiers keep their exact text; bare identifiers compare
/// case-insensitively and are lowered.
pub fn normalize_identifier(ident: &Identifier) -> Result<String, UnresolvedIdentifier> {
    if ident.value.is_empty() {
        return Err(UnresolvedIdentifier(ident.to_string()));
    }
    Ok(match ident.quote_style {
        Some(_) => ident.value.clone(),
        None => ident.value.to_lowercase()
    })
}
