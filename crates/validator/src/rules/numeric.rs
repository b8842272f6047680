//! Numeric rules.

use serde_json::Value;

use super::value_text;
use crate::rule::Outcome;

/// ASCII digits only, at least one.
///
/// Signs and separators fail: the rule describes digit strings, not the
/// full number grammar.
pub(crate) fn numeric(value: &Value, _params: &[String]) -> Outcome {
    value_text(value)
        .is_some_and(|text| !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()))
        .into()
}

/// A digit string with an optional fractional part (`decimal[:places]`).
///
/// `places` bounds the fractional digits; `*` (the default) allows any
/// count. The integer part may be empty (`.5`), the empty string passes.
pub(crate) fn decimal(value: &Value, params: &[String]) -> Outcome {
    let Some(text) = value_text(value) else {
        return false.into();
    };
    if text.is_empty() {
        return true.into();
    }

    let places = params.first().map_or("*", String::as_str);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_ref(), None),
    };

    if !int_part.chars().all(|c| c.is_ascii_digit()) {
        return false.into();
    }

    let valid = match frac_part {
        None => !int_part.is_empty(),
        Some(frac) => {
            let all_digits = !frac.is_empty() && frac.chars().all(|c| c.is_ascii_digit());
            match places {
                "*" => all_digits,
                bound => bound
                    .parse::<usize>()
                    .is_ok_and(|limit| all_digits && frac.chars().count() <= limit),
            }
        }
    };
    valid.into()
}

/// The numeric reading falls in the inclusive `between:min,max` range.
///
/// Strings are parsed; non-numeric values and malformed bounds fail.
pub(crate) fn between(value: &Value, params: &[String]) -> Outcome {
    let (Some(min), Some(max)) = (number_param(params, 0), number_param(params, 1)) else {
        return false.into();
    };
    value_number(value)
        .is_some_and(|number| number >= min && number <= max)
        .into()
}

fn number_param(params: &[String], index: usize) -> Option<f64> {
    params.get(index).and_then(|p| p.parse().ok())
}

fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
