//! Rule execution over a field's spec list.
//!
//! Synchronous rules report eagerly, in declaration order. Deferred rules
//! are collected and awaited together; every one of them contributes to the
//! aggregate verdict. Error-bag appends carry the generation token captured
//! at dispatch, so a completion that lost a race against a newer dispatch
//! (or an attach/detach) is discarded instead of resurrecting stale state.

use futures::future::{BoxFuture, join_all};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::ErrorBag;
use crate::field::FieldRegistry;
use crate::parser::RuleSpec;
use crate::rule::{Outcome, Settled};
use crate::ruleset::Ruleset;

/// What dispatching one rule produced.
enum Dispatch {
    Pass,
    Fail,
    Pending(BoxFuture<'static, Settled>),
}

/// One validation pass: the shared state plus the resolved per-call settings.
pub(crate) struct Engine<'a> {
    ruleset: &'a Ruleset,
    fields: &'a FieldRegistry,
    errors: &'a ErrorBag,
    locale: &'a str,
    strict: bool,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(
        ruleset: &'a Ruleset,
        fields: &'a FieldRegistry,
        errors: &'a ErrorBag,
        locale: &'a str,
        strict: bool,
    ) -> Self {
        Self {
            ruleset,
            fields,
            errors,
            locale,
            strict,
        }
    }

    /// Validates one field's value against its attached rules.
    ///
    /// Unknown fields follow the strict policy: failure under strict mode,
    /// a silent pass otherwise. Known fields have their previous errors
    /// cleared before the rules run.
    pub(crate) async fn validate_field(&self, field: &str, value: &Value) -> bool {
        let Some(entry) = self.fields.get(field) else {
            if !self.strict {
                return true;
            }
            warn!(field, "validating a field that was never attached");
            return false;
        };

        let token = self.fields.bump_generation(field);
        self.errors.remove(field);

        let display = entry.display_name.as_deref().unwrap_or(field);

        let mut passed = true;
        let mut pending: Vec<(&RuleSpec, BoxFuture<'static, Settled>)> = Vec::new();
        for spec in &entry.rules {
            match self.dispatch(field, token, display, value, spec) {
                Dispatch::Pass => {}
                Dispatch::Fail => passed = false,
                Dispatch::Pending(future) => pending.push((spec, future)),
            }
        }

        if pending.is_empty() {
            return passed;
        }

        let (specs, futures): (Vec<_>, Vec<_>) = pending.into_iter().unzip();
        let settled = join_all(futures).await;

        for (spec, settled) in specs.into_iter().zip(settled) {
            if settled.is_valid() {
                continue;
            }
            passed = false;
            self.record_failure(field, token, display, spec);
        }
        passed
    }

    /// Validates every entry of an ordered value map; no short-circuiting,
    /// every deferred rule of every field is awaited.
    pub(crate) async fn validate_all(&self, values: &IndexMap<String, Value>) -> bool {
        self.errors.clear();
        let futures: Vec<_> = values
            .iter()
            .map(|(field, value)| self.validate_field(field, value))
            .collect();
        join_all(futures).await.into_iter().all(|valid| valid)
    }

    /// Runs one rule spec against the value.
    fn dispatch(
        &self,
        field: &str,
        token: u64,
        display: &str,
        value: &Value,
        spec: &RuleSpec,
    ) -> Dispatch {
        let Some(rule) = self.ruleset.rule(&spec.name) else {
            warn!(
                field,
                rule = %spec.name,
                "no implementation registered for rule; counting it as failed"
            );
            self.record_failure(field, token, display, spec);
            return Dispatch::Fail;
        };

        match rule(value, &spec.params) {
            Outcome::Immediate(true) => Dispatch::Pass,
            Outcome::Immediate(false) => {
                self.record_failure(field, token, display, spec);
                Dispatch::Fail
            }
            Outcome::Deferred(future) => Dispatch::Pending(future),
        }
    }

    /// Appends the rule's rendered message, unless the dispatch token has
    /// been superseded in the meantime.
    fn record_failure(&self, field: &str, token: u64, display: &str, spec: &RuleSpec) {
        if !self.fields.generation_current(field, token) {
            debug!(field, rule = %spec.name, "discarding a stale failure report");
            return;
        }
        let message = self
            .ruleset
            .format_message(self.locale, &spec.name, display, &spec.params);
        self.errors.add(field, message);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Extension;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn checking_length(ruleset: &Ruleset) {
        ruleset
            .extend("longer_than", Extension::predicate(|value, params| {
                let min: usize = params[0].parse().unwrap_or(0);
                value.as_str().is_some_and(|s| s.len() > min).into()
            }))
            .unwrap();
    }

    fn engine_parts() -> (Ruleset, FieldRegistry, ErrorBag) {
        (Ruleset::new(), FieldRegistry::new(), ErrorBag::new())
    }

    #[test]
    fn test_passing_field_leaves_bag_empty() {
        let (ruleset, fields, errors) = engine_parts();
        checking_length(&ruleset);
        fields.attach("name", "longer_than:2", None, false);

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(block_on(engine.validate_field("name", &json!("abcd"))));
        assert!(!errors.any());
    }

    #[test]
    fn test_failing_field_appends_message() {
        let (ruleset, fields, errors) = engine_parts();
        checking_length(&ruleset);
        fields.attach("name", "longer_than:10", None, false);

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(!block_on(engine.validate_field("name", &json!("abcd"))));
        assert_eq!(errors.collect("name"), vec!["The name value is not valid.".to_string()]);
    }

    #[test]
    fn test_display_name_used_in_messages() {
        let (ruleset, fields, errors) = engine_parts();
        checking_length(&ruleset);
        fields.attach("name", "longer_than:10", Some("Full Name"), false);

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        block_on(engine.validate_field("name", &json!("abcd")));
        assert_eq!(errors.first("name"), Some("The Full Name value is not valid.".to_string()));
    }

    #[test]
    fn test_revalidation_clears_previous_errors() {
        let (ruleset, fields, errors) = engine_parts();
        checking_length(&ruleset);
        fields.attach("name", "longer_than:3", None, false);

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(!block_on(engine.validate_field("name", &json!("ab"))));
        assert!(errors.has("name"));

        assert!(block_on(engine.validate_field("name", &json!("abcd"))));
        assert!(!errors.has("name"));
    }

    #[test]
    fn test_unknown_field_strict_fails_without_bag_writes() {
        let (ruleset, fields, errors) = engine_parts();
        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);

        assert!(!block_on(engine.validate_field("ghost", &json!("x"))));
        assert!(!errors.any());
    }

    #[test]
    fn test_unknown_field_lenient_passes() {
        let (ruleset, fields, errors) = engine_parts();
        let engine = Engine::new(&ruleset, &fields, &errors, "en", false);

        assert!(block_on(engine.validate_field("ghost", &json!("x"))));
        assert!(!errors.any());
    }

    #[test]
    fn test_unknown_rule_counts_as_failed() {
        let (ruleset, fields, errors) = engine_parts();
        fields.attach("name", "mystery", None, false);

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(!block_on(engine.validate_field("name", &json!("x"))));
        assert_eq!(errors.first("name"), Some("The name value is not valid.".to_string()));
    }

    #[test]
    fn test_rules_run_in_declaration_order() {
        let (ruleset, fields, errors) = engine_parts();
        ruleset
            .extend("fail_a", Extension::predicate(|_, _| false.into()))
            .unwrap();
        ruleset
            .extend("fail_b", Extension::predicate(|_, _| false.into()))
            .unwrap();
        ruleset.update_dictionary([
            ("en", "fail_a", crate::rule::message(|_, _| "a".to_string())),
            ("en", "fail_b", crate::rule::message(|_, _| "b".to_string())),
        ]);
        fields.attach("name", "fail_b|fail_a", None, false);

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(!block_on(engine.validate_field("name", &json!("x"))));
        assert_eq!(errors.collect("name"), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_deferred_failure_appends_one_message() {
        let (ruleset, fields, errors) = engine_parts();
        ruleset
            .extend("remote", Extension::predicate(|_, _| {
                Outcome::deferred(async {
                    Settled::Many(vec![true.into(), false.into(), true.into()])
                })
            }))
            .unwrap();
        fields.attach("name", "remote", None, false);

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(!block_on(engine.validate_field("name", &json!("x"))));
        assert_eq!(errors.collect("name").len(), 1);
    }

    #[test]
    fn test_all_deferred_rules_contribute() {
        let (ruleset, fields, errors) = engine_parts();
        ruleset
            .extend("remote_pass", Extension::predicate(|_, _| {
                Outcome::deferred(async { Settled::One(true) })
            }))
            .unwrap();
        ruleset
            .extend("remote_fail", Extension::predicate(|_, _| {
                Outcome::deferred(async { Settled::One(false) })
            }))
            .unwrap();
        fields.attach("name", "remote_fail|remote_pass", None, false);

        // The failing deferred rule is first; a last-settled-wins engine
        // would report the field as valid here.
        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(!block_on(engine.validate_field("name", &json!("x"))));
        assert!(errors.has("name"));
    }

    #[test]
    fn test_sync_and_deferred_results_combine() {
        let (ruleset, fields, errors) = engine_parts();
        checking_length(&ruleset);
        ruleset
            .extend("remote_pass", Extension::predicate(|_, _| {
                Outcome::deferred(async { Settled::One(true) })
            }))
            .unwrap();
        fields.attach("name", "remote_pass|longer_than:10", None, false);

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(!block_on(engine.validate_field("name", &json!("ab"))));
    }

    #[test]
    fn test_validate_all_clears_bag_and_checks_everything() {
        let (ruleset, fields, errors) = engine_parts();
        checking_length(&ruleset);
        fields.attach("first", "longer_than:1", None, false);
        fields.attach("second", "longer_than:10", None, false);
        errors.add("leftover", "old message");

        let values: IndexMap<String, Value> = [
            ("first".to_string(), json!("abc")),
            ("second".to_string(), json!("abc")),
        ]
        .into_iter()
        .collect();

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(!block_on(engine.validate_all(&values)));
        assert!(!errors.has("leftover"));
        assert!(!errors.has("first"));
        assert!(errors.has("second"));
    }

    #[test]
    fn test_validate_all_passes_when_every_field_passes() {
        let (ruleset, fields, errors) = engine_parts();
        checking_length(&ruleset);
        fields.attach("first", "longer_than:1", None, false);
        fields.attach("second", "longer_than:2", None, false);

        let values: IndexMap<String, Value> = [
            ("first".to_string(), json!("abc")),
            ("second".to_string(), json!("abcd")),
        ]
        .into_iter()
        .collect();

        let engine = Engine::new(&ruleset, &fields, &errors, "en", true);
        assert!(block_on(engine.validate_all(&values)));
        assert!(!errors.any());
    }
}
