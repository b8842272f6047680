//! Membership rules: value must (not) be one of the listed options.

use serde_json::Value;

use super::value_text;
use crate::rule::Outcome;

/// The text form of the value equals one of the params (`in:a,b,c`).
pub(crate) fn is_in(value: &Value, params: &[String]) -> Outcome {
    value_text(value)
        .is_some_and(|text| params.iter().any(|option| text == option.as_str()))
        .into()
}

/// The text form of the value equals none of the params (`not_in:a,b,c`).
///
/// Values without a text form trivially pass: null is never "in" the list.
pub(crate) fn not_in(value: &Value, params: &[String]) -> Outcome {
    value_text(value)
        .is_none_or(|text| params.iter().all(|option| text != option.as_str()))
        .into()
}
