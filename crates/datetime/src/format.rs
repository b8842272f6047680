//! Date format tokens and parsing.
//!
//! Rule expressions carry formats in the `YYYY-MM-DD` token vocabulary.
//! Tokens translate to `strftime` specifiers for chrono; everything else
//! passes through as literal text. Parsing is strict: the whole input must
//! match, trailing text is an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Token vocabulary, longest token first within each letter family so
/// `MM` wins over `M` and `mm` over `m`.
const TOKENS: [(&str, &str); 12] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("M", "%m"),
    ("D", "%d"),
    ("H", "%H"),
    ("m", "%M"),
    ("s", "%S"),
];

/// Formats tried when no explicit format accompanies the value.
const FLEXIBLE_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y",
];

/// Translates a token-style format into a `strftime` format string.
///
/// Literal `%` characters in the input are escaped so chrono treats them
/// as text.
#[must_use]
pub fn to_strftime(format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 4);
    let mut rest = format;
    'scan: while !rest.is_empty() {
        for (token, specifier) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(specifier);
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            if ch == '%' {
                out.push_str("%%");
            } else {
                out.push(ch);
            }
        }
        rest = chars.as_str();
    }
    out
}

/// Parses `text` as a date, with an explicit token format or the flexible
/// candidate list. Date-only inputs land at midnight.
#[must_use]
pub fn parse_date(text: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    match format {
        Some(format) => parse_with_format(text, format),
        None => parse_flexible(text),
    }
}

fn parse_with_format(text: &str, format: &str) -> Option<NaiveDateTime> {
    let strftime = to_strftime(format);
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, &strftime) {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(text, &strftime)
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn parse_flexible(text: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }
    for format in FLEXIBLE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

// ============================================================================
// TESTS
// ============================================================================
