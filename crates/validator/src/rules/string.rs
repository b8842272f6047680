//! String shape and length rules.
//!
//! Lengths count Unicode scalar values. The character-class rules accept
//! the empty string; pairing them with `required` is what enforces
//! presence.

use serde_json::Value;

use super::value_text;
use crate::rule::Outcome;

/// Text form of at least `n` characters (`min:n`).
pub(crate) fn min(value: &Value, params: &[String]) -> Outcome {
    let Some(limit) = length_param(params) else {
        return false.into();
    };
    value_text(value)
        .is_some_and(|text| text.chars().count() >= limit)
        .into()
}

/// Text form of at most `n` characters (`max:n`).
pub(crate) fn max(value: &Value, params: &[String]) -> Outcome {
    let Some(limit) = length_param(params) else {
        return false.into();
    };
    value_text(value)
        .is_some_and(|text| text.chars().count() <= limit)
        .into()
}

/// ASCII letters only.
pub(crate) fn alpha(value: &Value, _params: &[String]) -> Outcome {
    chars_allowed(value, |c| c.is_ascii_alphabetic())
}

/// ASCII letters and digits only.
pub(crate) fn alpha_num(value: &Value, _params: &[String]) -> Outcome {
    chars_allowed(value, |c| c.is_ascii_alphanumeric())
}

/// Like `alpha_num`, plus dashes and underscores.
pub(crate) fn alpha_dash(value: &Value, _params: &[String]) -> Outcome {
    chars_allowed(value, |c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Exactly `n` ASCII digits (`digits:n`).
pub(crate) fn digits(value: &Value, params: &[String]) -> Outcome {
    let Some(length) = length_param(params) else {
        return false.into();
    };
    value_text(value)
        .is_some_and(|text| {
            text.chars().count() == length && text.chars().all(|c| c.is_ascii_digit())
        })
        .into()
}

fn length_param(params: &[String]) -> Option<usize> {
    params.first().and_then(|p| p.parse().ok())
}

fn chars_allowed(value: &Value, allowed: impl Fn(char) -> bool) -> Outcome {
    value_text(value)
        .is_some_and(|text| text.chars().all(allowed))
        .into()
}
