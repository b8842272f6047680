//! Presence checks.

use serde_json::Value;

use crate::rule::Outcome;

/// Fails on nulls, empty arrays and blank strings.
///
/// Non-empty collections, numbers, booleans and objects count as present,
/// so `false` and `0` are valid values for a required field.
pub(crate) fn required(value: &Value, _params: &[String]) -> Outcome {
    let present = match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => true,
    };
    present.into()
}
