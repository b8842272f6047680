//! Format rules: email, url, ip and user-supplied patterns.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;
use url::Url;

use super::value_text;
use crate::rule::Outcome;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// One `@`, no whitespace, a dotted domain.
///
/// A pragmatic shape check, not full RFC 5322.
pub(crate) fn email(value: &Value, _params: &[String]) -> Outcome {
    value_text(value).is_some_and(|text| EMAIL.is_match(&text)).into()
}

/// Parses as an absolute URL, scheme included.
pub(crate) fn url(value: &Value, _params: &[String]) -> Outcome {
    value_text(value).is_some_and(|text| Url::parse(&text).is_ok()).into()
}

/// A dotted-quad IPv4 address.
pub(crate) fn ip(value: &Value, _params: &[String]) -> Outcome {
    value_text(value)
        .is_some_and(|text| text.parse::<std::net::Ipv4Addr>().is_ok())
        .into()
}

/// The text form matches the pattern given as `regex:pattern`.
///
/// The pattern is compiled per invocation; an invalid pattern fails the
/// check with a diagnostic instead of erroring the validation pass.
/// Patterns containing `|`, `:` or `,` cannot be written in a rule
/// expression since those are expression delimiters.
pub(crate) fn regex(value: &Value, params: &[String]) -> Outcome {
    let Some(pattern) = params.first() else {
        return false.into();
    };
    let Some(text) = value_text(value) else {
        return false.into();
    };

    match Regex::new(pattern) {
        Ok(compiled) => compiled.is_match(&text).into(),
        Err(error) => {
            warn!(%error, pattern, "invalid pattern given to the regex rule");
            false.into()
        }
    }
}
