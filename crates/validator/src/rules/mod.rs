//! The built-in rule catalog.
//!
//! Rules are organized by category:
//!
//! - **presence**: `required`
//! - **string**: `min`, `max`, `alpha`, `alpha_num`, `alpha_dash`, `digits`
//! - **numeric**: `numeric`, `decimal`, `between`
//! - **format**: `email`, `url`, `ip`, `regex`
//! - **membership**: `in`, `not_in`
//!
//! Every built-in is synchronous. Values are [`serde_json::Value`]s; rules
//! that read the value as text accept strings, numbers and booleans, and
//! fail the check on nulls, arrays and objects rather than erroring.

pub(crate) mod format;
pub(crate) mod membership;
pub(crate) mod numeric;
pub(crate) mod presence;
pub(crate) mod string;

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use crate::registry::ExtendError;
use crate::rule::{Extension, Outcome};
use crate::ruleset::Ruleset;

/// Registers the whole catalog on a ruleset.
///
/// Fails with [`ExtendError::Conflict`] if any catalog name is already
/// taken; [`Ruleset::with_builtins`](crate::Ruleset::with_builtins) calls
/// this on a fresh ruleset where that cannot happen.
pub fn install(ruleset: &Ruleset) -> Result<(), ExtendError> {
    let catalog: [(&str, fn(&Value, &[String]) -> Outcome); 16] = [
        ("required", presence::required),
        ("min", string::min),
        ("max", string::max),
        ("alpha", string::alpha),
        ("alpha_num", string::alpha_num),
        ("alpha_dash", string::alpha_dash),
        ("digits", string::digits),
        ("numeric", numeric::numeric),
        ("decimal", numeric::decimal),
        ("between", numeric::between),
        ("email", format::email),
        ("url", format::url),
        ("ip", format::ip),
        ("regex", format::regex),
        ("in", membership::is_in),
        ("not_in", membership::not_in),
    ];

    for (name, rule) in catalog {
        ruleset.extend(name, Extension::Predicate(Arc::new(rule)))?;
    }
    Ok(())
}

/// Reads a value as text the way the string-oriented rules see it.
///
/// Strings pass through; numbers and booleans use their display form;
/// nulls, arrays and objects have no text reading.
pub(crate) fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
