//! English message catalog for the built-in rules.

use crate::dictionary::{BASE_LOCALE, MessageDictionary};
use crate::rule::message;

fn param<'a>(params: &'a [String], index: usize) -> &'a str {
    params.get(index).map_or("", String::as_str)
}

/// Installs the English messages for every built-in rule into `dictionary`.
///
/// Existing entries for the same rule names are overwritten.
pub fn install(dictionary: &MessageDictionary) {
    dictionary.set(
        BASE_LOCALE,
        "alpha",
        message(|field, _| format!("The {field} may only contain alphabetic characters.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "alpha_dash",
        message(|field, _| {
            format!(
                "The {field} may contain alpha-numeric characters as well as dashes and underscores."
            )
        }),
    );
    dictionary.set(
        BASE_LOCALE,
        "alpha_num",
        message(|field, _| format!("The {field} may only contain alpha-numeric characters.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "between",
        message(|field, params| {
            let min = param(params, 0);
            let max = param(params, 1);
            format!("The {field} must be between {min} and {max}.")
        }),
    );
    dictionary.set(
        BASE_LOCALE,
        "decimal",
        message(|field, params| {
            let decimals = params.first().map_or("*", String::as_str);
            format!("The {field} must be numeric and may contain {decimals} decimal points.")
        }),
    );
    dictionary.set(
        BASE_LOCALE,
        "digits",
        message(|field, params| {
            let length = param(params, 0);
            format!("The {field} must be numeric and exactly contain {length} digits.")
        }),
    );
    dictionary.set(
        BASE_LOCALE,
        "email",
        message(|field, _| format!("The {field} must be a valid email.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "in",
        message(|field, _| format!("The {field} must be a valid value.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "ip",
        message(|field, _| format!("The {field} must be a valid ip address.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "max",
        message(|field, params| {
            let length = param(params, 0);
            format!("The {field} may not be greater than {length} characters.")
        }),
    );
    dictionary.set(
        BASE_LOCALE,
        "min",
        message(|field, params| {
            let length = param(params, 0);
            format!("The {field} must be at least {length} characters.")
        }),
    );
    dictionary.set(
        BASE_LOCALE,
        "not_in",
        message(|field, _| format!("The {field} must be a valid value.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "numeric",
        message(|field, _| format!("The {field} may only contain numeric characters.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "regex",
        message(|field, _| format!("The {field} format is invalid.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "required",
        message(|field, _| format!("The {field} is required.")),
    );
    dictionary.set(
        BASE_LOCALE,
        "url",
        message(|field, _| format!("The {field} is not a valid URL.")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(rule: &str, display: &str, params: &[&str]) -> String {
        let dictionary = MessageDictionary::default();
        install(&dictionary);
        let params: Vec<String> = params.iter().map(ToString::to_string).collect();
        dictionary.format(BASE_LOCALE, BASE_LOCALE, rule, display, &params)
    }

    #[test]
    fn test_plain_messages_name_the_field() {
        assert_eq!(render("required", "email", &[]), "The email is required.");
        assert_eq!(render("url", "homepage", &[]), "The homepage is not a valid URL.");
    }

    #[test]
    fn test_parametrized_messages_splice_rule_params() {
        assert_eq!(
            render("min", "password", &["8"]),
            "The password must be at least 8 characters."
        );
        assert_eq!(
            render("between", "age", &["18", "65"]),
            "The age must be between 18 and 65."
        );
    }

    #[test]
    fn test_decimal_defaults_to_unbounded_places() {
        assert_eq!(
            render("decimal", "price", &[]),
            "The price must be numeric and may contain * decimal points."
        );
        assert_eq!(
            render("decimal", "price", &["2"]),
            "The price must be numeric and may contain 2 decimal points."
        );
    }
}
