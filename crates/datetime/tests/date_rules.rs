//! Date rules exercised through a full ruleset and validator.

use std::sync::Arc;

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use veld::{Extension, Ruleset, Validator};
use veld_datetime::DateRules;

fn dated_ruleset() -> Arc<Ruleset> {
    let ruleset = Ruleset::with_builtins();
    ruleset.install_datetime(&DateRules).unwrap();
    Arc::new(ruleset)
}

#[tokio::test]
async fn test_date_format_end_to_end() {
    let validator = Validator::new(dated_ruleset());
    validator.attach("birthday", "required|date_format:DD/MM/YYYY");

    assert!(validator.validate("birthday", &json!("24/12/1990")).await);

    assert!(!validator.validate("birthday", &json!("1990-12-24")).await);
    assert_eq!(
        validator.errors().first("birthday"),
        Some("The birthday must be in the format DD/MM/YYYY.".to_string())
    );
}

#[tokio::test]
async fn test_comparisons_borrow_the_field_format() {
    let validator = Validator::new(dated_ruleset());
    validator.attach("expires", "date_format:DD/MM/YYYY|after:01/01/2026");

    // A day-first value only parses under the borrowed format.
    assert!(validator.validate("expires", &json!("02/01/2026")).await);

    assert!(!validator.validate("expires", &json!("31/12/2025")).await);
    assert_eq!(
        validator.errors().first("expires"),
        Some("The expires must be after 01/01/2026.".to_string())
    );
}

#[tokio::test]
async fn test_date_between_borrows_and_reports() {
    let validator = Validator::new(dated_ruleset());
    validator.attach("meeting", "date_format:YYYY-MM-DD|date_between:2026-01-01,2026-12-31");

    assert!(validator.validate("meeting", &json!("2026-06-15")).await);

    assert!(!validator.validate("meeting", &json!("2027-02-01")).await);
    assert_eq!(
        validator.errors().first("meeting"),
        Some("The meeting must be between 2026-01-01 and 2026-12-31.".to_string())
    );
}

#[tokio::test]
async fn test_fields_attached_before_install_do_not_borrow() {
    let ruleset = Arc::new(Ruleset::with_builtins());
    let validator = Validator::new(Arc::clone(&ruleset));
    validator.attach("expires", "date_format:DD/MM/YYYY|after:01/01/2026");

    ruleset.install_datetime(&DateRules).unwrap();

    // The expression was parsed before the capability existed, so the
    // comparison carries no borrowed format and the day-first value
    // does not parse flexibly.
    assert!(!validator.validate("expires", &json!("02/01/2026")).await);

    // Re-attaching reparses the expression date-aware.
    validator.attach("expires", "date_format:DD/MM/YYYY|after:01/01/2026");
    assert!(validator.validate("expires", &json!("02/01/2026")).await);
}

#[tokio::test]
async fn test_install_is_idempotent() {
    let ruleset = Ruleset::with_builtins();
    assert!(ruleset.install_datetime(&DateRules).unwrap());
    assert!(!ruleset.install_datetime(&DateRules).unwrap());
    assert!(ruleset.datetime_installed());
}

#[tokio::test]
async fn test_install_conflict_leaves_capability_off() {
    let ruleset = Ruleset::with_builtins();
    ruleset
        .extend("after", Extension::predicate(|_, _| true.into()))
        .unwrap();

    assert!(ruleset.install_datetime(&DateRules).is_err());
    assert!(!ruleset.datetime_installed());
}

#[tokio::test]
async fn test_validate_all_mixes_date_and_core_rules() {
    let validator = Validator::new(dated_ruleset());
    validator.attach("email", "required|email");
    validator.attach("starts", "required|date_format:YYYY-MM-DD");

    let values: IndexMap<String, Value> = [
        ("email".to_string(), json!("ada@example.com")),
        ("starts".to_string(), json!("2026-03-01")),
    ]
    .into_iter()
    .collect();
    assert!(validator.validate_all(&values).await);

    let values: IndexMap<String, Value> = [
        ("email".to_string(), json!("ada@example.com")),
        ("starts".to_string(), json!("03/01/2026")),
    ]
    .into_iter()
    .collect();
    assert!(!validator.validate_all(&values).await);
    assert!(validator.errors().has("starts"));
    assert!(!validator.errors().has("email"));
}
