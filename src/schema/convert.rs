//! Conversion between stored rules and UI templates.
//!
//! Each [`PayloadShape`] owns one [`Conversion`] entry: the exact component
//! composition it requires plus the two conversion functions. Both directions
//! validate the composition first and fail instead of falling back to
//! defaults.

use super::{
    catalog::RuleType,
    types::{
        CasePayload, CommentFormatPayload, ComponentConfig, ComponentKind, ComponentPayload,
        NamingFormatPayload, NumberValuePayload, Rule, RulePayload, RuleTemplate,
        StringArrayLimitPayload, StringValuePayload
    }
};
use crate::error::{ReviewError, ReviewResult};

type ToPolicyFn = fn(&str, &[ComponentConfig]) -> ReviewResult<Option<RulePayload>>;
type ToTemplateFn = fn(&str, &RulePayload, &mut [ComponentConfig]) -> ReviewResult<()>;

/// Stored payload layout of a rule type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadShape {
    /// No parameters
    None,
    /// `{STRING format, NUMBER maxLength}` as NamingFormatPayload
    NamingFormat,
    /// `{TEMPLATE format, NUMBER maxLength}` as NamingFormatPayload
    NamingTemplate,
    /// `{STRING format}` as NamingFormatPayload without length limit
    FormatOnly,
    /// `{STRING_ARRAY list}`
    StringArray,
    /// `{BOOLEAN required, NUMBER maxLength}`
    CommentFormat,
    /// `{NUMBER number}`
    Number,
    /// `{STRING string}`
    StringValue,
    /// `{BOOLEAN upper}`
    Case
}

/// Conversion table entry of one payload shape
pub struct Conversion {
    pub required:    &'static [ComponentKind],
    /// Payload variant the shape stores, for error messages
    pub payload:     &'static str,
    pub to_policy:   ToPolicyFn,
    pub to_template: ToTemplateFn
}

static NO_PAYLOAD: Conversion = Conversion {
    required:    &[],
    payload:     "empty",
    to_policy:   empty_to_policy,
    to_template: empty_to_template
};

static NAMING_FORMAT: Conversion = Conversion {
    required:    &[ComponentKind::String, ComponentKind::Number],
    payload:     "NamingFormatPayload",
    to_policy:   naming_to_policy,
    to_template: naming_to_template
};

static NAMING_TEMPLATE: Conversion = Conversion {
    required:    &[ComponentKind::Template, ComponentKind::Number],
    payload:     "NamingFormatPayload",
    to_policy:   naming_to_policy,
    to_template: naming_to_template
};

static FORMAT_ONLY: Conversion = Conversion {
    required:    &[ComponentKind::String],
    payload:     "NamingFormatPayload",
    to_policy:   format_only_to_policy,
    to_template: format_only_to_template
};

static STRING_ARRAY: Conversion = Conversion {
    required:    &[ComponentKind::StringArray],
    payload:     "StringArrayLimitPayload",
    to_policy:   string_array_to_policy,
    to_template: string_array_to_template
};

static COMMENT_FORMAT: Conversion = Conversion {
    required:    &[ComponentKind::Boolean, ComponentKind::Number],
    payload:     "CommentFormatPayload",
    to_policy:   comment_to_policy,
    to_template: comment_to_template
};

static NUMBER: Conversion = Conversion {
    required:    &[ComponentKind::Number],
    payload:     "NumberValuePayload",
    to_policy:   number_to_policy,
    to_template: number_to_template
};

static STRING_VALUE: Conversion = Conversion {
    required:    &[ComponentKind::String],
    payload:     "StringValuePayload",
    to_policy:   string_value_to_policy,
    to_template: string_value_to_template
};

static CASE: Conversion = Conversion {
    required:    &[ComponentKind::Boolean],
    payload:     "CasePayload",
    to_policy:   case_to_policy,
    to_template: case_to_template
};

impl PayloadShape {
    pub fn conversion(self) -> &'static Conversion {
        match self {
            Self::None => &NO_PAYLOAD,
            Self::NamingFormat => &NAMING_FORMAT,
            Self::NamingTemplate => &NAMING_TEMPLATE,
            Self::FormatOnly => &FORMAT_ONLY,
            Self::StringArray => &STRING_ARRAY,
            Self::CommentFormat => &COMMENT_FORMAT,
            Self::Number => &NUMBER,
            Self::StringValue => &STRING_VALUE,
            Self::Case => &CASE
        }
    }
}

impl Conversion {
    /// Check that `components` has exactly the required kinds, in order
    pub fn validate(&self, rule_type: &str, components: &[ComponentConfig]) -> ReviewResult<()> {
        if let Some(kind) = self
            .required
            .iter()
            .find(|kind| !components.iter().any(|c| c.kind() == **kind))
        {
            return Err(ReviewError::MissingComponent {
                rule_type: rule_type.to_string(),
                kind:      *kind
            });
        }
        let found: Vec<ComponentKind> = components.iter().map(ComponentConfig::kind).collect();
        if found != self.required {
            return Err(ReviewError::ComponentMismatch {
                rule_type: rule_type.to_string(),
                expected:  join_kinds(self.required),
                found:     join_kinds(&found)
            });
        }
        Ok(())
    }
}

/// Overlay a stored rule onto its template.
///
/// Level, dialect and comment are copied from `rule`; payload values become
/// the current values of the matching components. A rule without payload
/// keeps the template's values.
///
/// # Errors
///
/// Fails if the rule type is not in the catalog, differs from the template's
/// type, the template components do not match the declared composition, or
/// the payload is of the wrong variant.
pub fn policy_rule_to_template(rule: &Rule, template: &RuleTemplate) -> ReviewResult<RuleTemplate> {
    let rule_type: RuleType = rule.rule_type.parse()?;
    if rule.rule_type != template.rule_type {
        return Err(ReviewError::RuleTypeMismatch {
            rule:     rule.rule_type.to_string(),
            template: template.rule_type.to_string()
        });
    }
    let conversion = rule_type.shape().conversion();
    conversion.validate(rule_type.as_str(), &template.component_list)?;

    let mut result = template.clone();
    result.level = rule.level;
    result.dialect = rule.dialect;
    result.comment = rule.comment.clone();
    if let Some(payload) = &rule.payload {
        (conversion.to_template)(rule_type.as_str(), payload, &mut result.component_list)?;
    }
    Ok(result)
}

/// Assemble the stored rule from a template's current (or default) values.
///
/// # Errors
///
/// Fails if the rule type is not in the catalog, the components do not match
/// the declared composition, or a value does not fit the stored payload.
pub fn template_to_policy_rule(template: &RuleTemplate) -> ReviewResult<Rule> {
    let rule_type: RuleType = template.rule_type.parse()?;
    let conversion = rule_type.shape().conversion();
    conversion.validate(rule_type.as_str(), &template.component_list)?;
    let payload = (conversion.to_policy)(rule_type.as_str(), &template.component_list)?;
    Ok(Rule {
        rule_type: template.rule_type.clone(),
        level: template.level,
        dialect: template.dialect,
        payload,
        comment: template.comment.clone()
    })
}

fn join_kinds(kinds: &[ComponentKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn payload_mismatch(rule_type: &str, expected: &'static str) -> ReviewError {
    ReviewError::PayloadMismatch {
        rule_type: rule_type.to_string(),
        expected
    }
}

fn invalid_value(rule_type: &str, key: &str, message: impl Into<String>) -> ReviewError {
    ReviewError::InvalidComponentValue {
        rule_type: rule_type.to_string(),
        key:       key.to_string(),
        message:   message.into()
    }
}

fn read_text(rule_type: &str, component: &ComponentConfig) -> ReviewResult<String> {
    match &component.payload {
        ComponentPayload::String {
            default,
            value
        }
        | ComponentPayload::Template {
            default,
            value,
            ..
        } => Ok(value.clone().unwrap_or_else(|| default.clone())),
        other => Err(ReviewError::MissingComponent {
            rule_type: rule_type.to_string(),
            kind:      other.kind()
        })
    }
}

fn read_number(rule_type: &str, component: &ComponentConfig) -> ReviewResult<i64> {
    match &component.payload {
        ComponentPayload::Number {
            default,
            value
        } => Ok(value.unwrap_or(*default)),
        _ => Err(ReviewError::MissingComponent {
            rule_type: rule_type.to_string(),
            kind:      ComponentKind::Number
        })
    }
}

fn read_bool(rule_type: &str, component: &ComponentConfig) -> ReviewResult<bool> {
    match &component.payload {
        ComponentPayload::Boolean {
            default,
            value
        } => Ok(value.unwrap_or(*default)),
        _ => Err(ReviewError::MissingComponent {
            rule_type: rule_type.to_string(),
            kind:      ComponentKind::Boolean
        })
    }
}

fn read_list(rule_type: &str, component: &ComponentConfig) -> ReviewResult<Vec<String>> {
    match &component.payload {
        ComponentPayload::StringArray {
            default,
            value
        } => Ok(value.clone().unwrap_or_else(|| default.clone())),
        _ => Err(ReviewError::MissingComponent {
            rule_type: rule_type.to_string(),
            kind:      ComponentKind::StringArray
        })
    }
}

fn write_text(component: &mut ComponentConfig, text: &str) {
    match &mut component.payload {
        ComponentPayload::String {
            value, ..
        }
        | ComponentPayload::Template {
            value, ..
        } => *value = Some(text.to_string()),
        _ => {}
    }
}

fn write_number(component: &mut ComponentConfig, number: i64) {
    if let ComponentPayload::Number {
        value, ..
    } = &mut component.payload
    {
        *value = Some(number);
    }
}

fn write_bool(component: &mut ComponentConfig, flag: bool) {
    if let ComponentPayload::Boolean {
        value, ..
    } = &mut component.payload
    {
        *value = Some(flag);
    }
}

fn write_list(component: &mut ComponentConfig, list: &[String]) {
    if let ComponentPayload::StringArray {
        value, ..
    } = &mut component.payload
    {
        *value = Some(list.to_vec());
    }
}

fn empty_to_policy(_: &str, _: &[ComponentConfig]) -> ReviewResult<Option<RulePayload>> {
    Ok(None)
}

fn empty_to_template(rule_type: &str, _: &RulePayload, _: &mut [ComponentConfig]) -> ReviewResult<()> {
    Err(payload_mismatch(rule_type, NO_PAYLOAD.payload))
}

// Component slices below are already validated against `required`, so the
// positional indexing cannot go out of bounds.

fn naming_to_policy(rule_type: &str, c: &[ComponentConfig]) -> ReviewResult<Option<RulePayload>> {
    let format = read_text(rule_type, &c[0])?;
    let max_length = read_number(rule_type, &c[1])?;
    let max_length = usize::try_from(max_length)
        .map_err(|_| invalid_value(rule_type, &c[1].key, "must not be negative"))?;
    Ok(Some(RulePayload::NamingFormat(NamingFormatPayload {
        format,
        max_length
    })))
}

fn naming_to_template(
    rule_type: &str,
    payload: &RulePayload,
    c: &mut [ComponentConfig]
) -> ReviewResult<()> {
    let RulePayload::NamingFormat(naming) = payload else {
        return Err(payload_mismatch(rule_type, NAMING_FORMAT.payload));
    };
    let max_length = i64::try_from(naming.max_length)
        .map_err(|_| invalid_value(rule_type, &c[1].key, "out of range"))?;
    write_text(&mut c[0], &naming.format);
    write_number(&mut c[1], max_length);
    Ok(())
}

fn format_only_to_policy(
    rule_type: &str,
    c: &[ComponentConfig]
) -> ReviewResult<Option<RulePayload>> {
    Ok(Some(RulePayload::NamingFormat(NamingFormatPayload {
        format:     read_text(rule_type, &c[0])?,
        max_length: 0
    })))
}

fn format_only_to_template(
    rule_type: &str,
    payload: &RulePayload,
    c: &mut [ComponentConfig]
) -> ReviewResult<()> {
    let RulePayload::NamingFormat(naming) = payload else {
        return Err(payload_mismatch(rule_type, FORMAT_ONLY.payload));
    };
    if naming.max_length != 0 {
        return Err(invalid_value(
            rule_type,
            "maxLength",
            "length limit is not configurable for this rule"
        ));
    }
    write_text(&mut c[0], &naming.format);
    Ok(())
}

fn string_array_to_policy(
    rule_type: &str,
    c: &[ComponentConfig]
) -> ReviewResult<Option<RulePayload>> {
    Ok(Some(RulePayload::StringArrayLimit(StringArrayLimitPayload {
        list: read_list(rule_type, &c[0])?
    })))
}

fn string_array_to_template(
    rule_type: &str,
    payload: &RulePayload,
    c: &mut [ComponentConfig]
) -> ReviewResult<()> {
    let RulePayload::StringArrayLimit(limit) = payload else {
        return Err(payload_mismatch(rule_type, STRING_ARRAY.payload));
    };
    write_list(&mut c[0], &limit.list);
    Ok(())
}

fn comment_to_policy(rule_type: &str, c: &[ComponentConfig]) -> ReviewResult<Option<RulePayload>> {
    Ok(Some(RulePayload::CommentFormat(CommentFormatPayload {
        required:   read_bool(rule_type, &c[0])?,
        max_length: read_number(rule_type, &c[1])?
    })))
}

fn comment_to_template(
    rule_type: &str,
    payload: &RulePayload,
    c: &mut [ComponentConfig]
) -> ReviewResult<()> {
    let RulePayload::CommentFormat(comment) = payload else {
        return Err(payload_mismatch(rule_type, COMMENT_FORMAT.payload));
    };
    write_bool(&mut c[0], comment.required);
    write_number(&mut c[1], comment.max_length);
    Ok(())
}

fn number_to_policy(rule_type: &str, c: &[ComponentConfig]) -> ReviewResult<Option<RulePayload>> {
    Ok(Some(RulePayload::NumberValue(NumberValuePayload {
        number: read_number(rule_type, &c[0])?
    })))
}

fn number_to_template(
    rule_type: &str,
    payload: &RulePayload,
    c: &mut [ComponentConfig]
) -> ReviewResult<()> {
    let RulePayload::NumberValue(number) = payload else {
        return Err(payload_mismatch(rule_type, NUMBER.payload));
    };
    write_number(&mut c[0], number.number);
    Ok(())
}

fn string_value_to_policy(
    rule_type: &str,
    c: &[ComponentConfig]
) -> ReviewResult<Option<RulePayload>> {
    Ok(Some(RulePayload::StringValue(StringValuePayload {
        string: read_text(rule_type, &c[0])?
    })))
}

fn string_value_to_template(
    rule_type: &str,
    payload: &RulePayload,
    c: &mut [ComponentConfig]
) -> ReviewResult<()> {
    let RulePayload::StringValue(value) = payload else {
        return Err(payload_mismatch(rule_type, STRING_VALUE.payload));
    };
    write_text(&mut c[0], &value.string);
    Ok(())
}

fn case_to_policy(rule_type: &str, c: &[ComponentConfig]) -> ReviewResult<Option<RulePayload>> {
    Ok(Some(RulePayload::Case(CasePayload {
        upper: read_bool(rule_type, &c[0])?
    })))
}

fn case_to_template(
    rule_type: &str,
    payload: &RulePayload,
    c: &mut [ComponentConfig]
) -> ReviewResult<()> {
    let RulePayload::Case(case) = payload else {
        return Err(payload_mismatch(rule_type, CASE.payload));
    };
    write_bool(&mut c[0], case.upper);
    Ok(())
}
