//! The date rule catalog and its provider.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::warn;
use veld::{DateTimeProvider, Extension, MessageFn, Outcome, message};

use crate::format::parse_date;

// ============================================================================
// RULES
// ============================================================================

/// The value parses strictly under the format given as `date_format:FORMAT`.
fn date_format(value: &Value, params: &[String]) -> Outcome {
    let Some(format) = params.first() else {
        warn!(rule = "date_format", "no format parameter given");
        return false.into();
    };
    value
        .as_str()
        .is_some_and(|text| parse_date(text, Some(format)).is_some())
        .into()
}

/// A date strictly after the target (`after:TARGET[,FORMAT]`).
fn after(value: &Value, params: &[String]) -> Outcome {
    let format = params.get(1).map(String::as_str);
    let (Some(value), Some(target)) = (
        parse_value(value, format),
        operand("after", params, 0, format),
    ) else {
        return false.into();
    };
    (value > target).into()
}

/// A date strictly before the target (`before:TARGET[,FORMAT]`).
fn before(value: &Value, params: &[String]) -> Outcome {
    let format = params.get(1).map(String::as_str);
    let (Some(value), Some(target)) = (
        parse_value(value, format),
        operand("before", params, 0, format),
    ) else {
        return false.into();
    };
    (value < target).into()
}

/// A date strictly between the bounds of `date_between:MIN,MAX[,FORMAT]`.
/// Both bounds are exclusive.
fn date_between(value: &Value, params: &[String]) -> Outcome {
    let format = params.get(2).map(String::as_str);
    let (Some(value), Some(min), Some(max)) = (
        parse_value(value, format),
        operand("date_between", params, 0, format),
        operand("date_between", params, 1, format),
    ) else {
        return false.into();
    };
    (min < value && value < max).into()
}

/// Parses the value under check. A failure here is an ordinary invalid
/// value, not a misconfiguration.
fn parse_value(value: &Value, format: Option<&str>) -> Option<NaiveDateTime> {
    value.as_str().and_then(|text| parse_date(text, format))
}

/// Parses a comparison operand from the rule parameters. These come from
/// the attached expression, so a failure is worth a diagnostic.
fn operand(
    rule: &str,
    params: &[String],
    index: usize,
    format: Option<&str>,
) -> Option<NaiveDateTime> {
    let Some(text) = params.get(index) else {
        warn!(rule, index, "date comparison is missing an operand");
        return None;
    };
    let parsed = parse_date(text, format);
    if parsed.is_none() {
        warn!(
            rule,
            operand = %text,
            "date comparison operand does not parse under the effective format"
        );
    }
    parsed
}

// ============================================================================
// PROVIDER
// ============================================================================

/// The chrono-backed date capability.
///
/// Install it on a ruleset to register the four date rules, their English
/// messages, and date-aware expression parsing:
///
/// ```rust,ignore
/// use veld::Ruleset;
/// use veld_datetime::DateRules;
///
/// let ruleset = Ruleset::with_builtins();
/// ruleset.install_datetime(&DateRules)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRules;

impl DateTimeProvider for DateRules {
    fn rules(&self) -> Vec<(String, Extension)> {
        vec![
            ("date_format".to_string(), Extension::predicate(date_format)),
            ("after".to_string(), Extension::predicate(after)),
            ("before".to_string(), Extension::predicate(before)),
            ("date_between".to_string(), Extension::predicate(date_between)),
        ]
    }

    fn messages(&self) -> Vec<(String, String, MessageFn)> {
        let en = |rule: &str, formatter: MessageFn| ("en".to_string(), rule.to_string(), formatter);
        vec![
            en(
                "date_format",
                message(|field, params| {
                    format!(
                        "The {field} must be in the format {}.",
                        params.first().map_or("", String::as_str)
                    )
                }),
            ),
            en(
                "after",
                message(|field, params| {
                    format!(
                        "The {field} must be after {}.",
                        params.first().map_or("", String::as_str)
                    )
                }),
            ),
            en(
                "before",
                message(|field, params| {
                    format!(
                        "The {field} must be before {}.",
                        params.first().map_or("", String::as_str)
                    )
                }),
            ),
            en(
                "date_between",
                message(|field, params| {
                    let min = params.first().map_or("", String::as_str);
                    let max = params.get(1).map_or("", String::as_str);
                    format!("The {field} must be between {min} and {max}.")
                }),
            ),
        ]
    }
}

// ============================================================================
// TESTS
// ============================================================================
