//! The rule expression mini-language.
//!
//! An expression is a pipe-delimited list of rule segments. Each segment is
//! a rule name, optionally followed by `:` and a comma-separated parameter
//! list: `required|min:3|between:18,65`. Delimiters cannot be escaped, so
//! parameter values themselves cannot contain `|`, `:` or `,`.
//!
//! When date validation is installed, the comparison rules `after`, `before`
//! and `date_between` borrow the first parameter of a `date_format` segment
//! declared earlier in the same expression; the borrowed format is appended
//! as their trailing parameter. Declaration order is significant:
//! `date_format` must precede the comparison for the borrow to happen.

use smallvec::SmallVec;

/// Rules that parse their operands as dates and need the field's format.
const DATE_COMPARISON_RULES: [&str; 3] = ["after", "before", "date_between"];

/// The rule whose first parameter carries the field's date format.
const DATE_FORMAT_RULE: &str = "date_format";

// ============================================================================
// RULE SPEC
// ============================================================================

/// One parsed rule reference: a name plus positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    /// The registered rule name.
    pub name: String,
    /// Positional parameters, in declaration order.
    pub params: SmallVec<[String; 2]>,
}

impl RuleSpec {
    /// Creates a spec from a name and parameters.
    pub fn new(name: impl Into<String>, params: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
        }
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parses a full pipe-delimited expression into ordered rule specs.
///
/// Empty segments (`"a||b"`, trailing `|`) are skipped.
#[must_use]
pub fn parse_expression(expression: &str, date_aware: bool) -> Vec<RuleSpec> {
    let mut specs = Vec::new();
    for segment in expression.split('|') {
        if segment.is_empty() {
            continue;
        }
        let spec = parse_segment(segment, &specs, date_aware);
        specs.push(spec);
    }
    specs
}

/// Parses one segment, borrowing the date format from `prior` specs when
/// the segment names a date comparison rule.
#[must_use]
pub fn parse_segment(segment: &str, prior: &[RuleSpec], date_aware: bool) -> RuleSpec {
    let (name, mut params) = match segment.split_once(':') {
        Some((name, rest)) => {
            let params: SmallVec<[String; 2]> = rest.split(',').map(str::to_string).collect();
            (name, params)
        }
        None => (segment, SmallVec::new()),
    };

    if date_aware && DATE_COMPARISON_RULES.contains(&name) {
        let format = prior
            .iter()
            .find(|spec| spec.name == DATE_FORMAT_RULE)
            .and_then(|spec| spec.params.first());
        if let Some(format) = format {
            params.push(format.clone());
        }
    }

    RuleSpec {
        name: name.to_string(),
        params,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(name: &str, params: &[&str]) -> RuleSpec {
        RuleSpec::new(name, params.iter().map(|p| (*p).to_string()))
    }

    #[test]
    fn test_bare_rule_has_no_params() {
        assert_eq!(parse_expression("required", false), vec![spec("required", &[])]);
    }

    #[test]
    fn test_params_split_on_commas() {
        assert_eq!(
            parse_expression("between:18,65", false),
            vec![spec("between", &["18", "65"])]
        );
    }

    #[test]
    fn test_segments_preserve_declaration_order() {
        assert_eq!(
            parse_expression("required|min:3|max:20", false),
            vec![spec("required", &[]), spec("min", &["3"]), spec("max", &["20"])]
        );
    }

    #[test]
    fn test_trailing_colon_yields_one_empty_param() {
        assert_eq!(parse_expression("min:", false), vec![spec("min", &[""])]);
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        assert_eq!(
            parse_expression("required||min:3|", false),
            vec![spec("required", &[]), spec("min", &["3"])]
        );
        assert_eq!(parse_expression("", false), Vec::<RuleSpec>::new());
    }

    #[test]
    fn test_date_comparison_borrows_format() {
        let specs = parse_expression("date_format:DD/MM/YYYY|after:field_start", true);
        assert_eq!(
            specs,
            vec![
                spec("date_format", &["DD/MM/YYYY"]),
                spec("after", &["field_start", "DD/MM/YYYY"]),
            ]
        );
    }

    #[test]
    fn test_no_borrow_without_date_awareness() {
        let specs = parse_expression("date_format:DD/MM/YYYY|after:field_start", false);
        assert_eq!(specs[1], spec("after", &["field_start"]));
    }

    #[test]
    fn test_no_borrow_when_format_declared_later() {
        // The comparison only sees segments declared before it.
        let specs = parse_expression("after:field_start|date_format:DD/MM/YYYY", true);
        assert_eq!(specs[0], spec("after", &["field_start"]));
    }

    #[test]
    fn test_all_date_comparisons_borrow() {
        let specs = parse_expression(
            "date_format:YYYY-MM-DD|after:start|before:end|date_between:start,end",
            true,
        );
        assert_eq!(specs[1], spec("after", &["start", "YYYY-MM-DD"]));
        assert_eq!(specs[2], spec("before", &["end", "YYYY-MM-DD"]));
        assert_eq!(specs[3], spec("date_between", &["start", "end", "YYYY-MM-DD"]));
    }

    #[test]
    fn test_unrelated_rules_do_not_borrow() {
        let specs = parse_expression("date_format:YYYY-MM-DD|min:3", true);
        assert_eq!(specs[1], spec("min", &["3"]));
    }

    #[test]
    fn test_format_without_params_is_not_borrowed() {
        let specs = parse_expression("date_format|after:start", true);
        assert_eq!(specs[1], spec("after", &["start"]));
    }
}
