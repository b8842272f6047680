//! The per-form validation facade.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::warn;

use crate::engine::Engine;
use crate::errors::ErrorBag;
use crate::field::FieldRegistry;
use crate::registry::ExtendError;
use crate::rule::{Extension, MessageFn};
use crate::ruleset::Ruleset;

// ============================================================================
// VALIDATOR
// ============================================================================

/// Field registrations, their accumulated errors, and per-instance settings
/// layered over a shared [`Ruleset`].
///
/// Locale and strict mode are overrides: until [`Validator::set_locale`] or
/// [`Validator::set_strict`] is called, the instance follows the ruleset's
/// shared defaults, including later changes to them.
#[derive(Debug)]
pub struct Validator {
    ruleset: Arc<Ruleset>,
    fields: FieldRegistry,
    errors: ErrorBag,
    locale: RwLock<Option<String>>,
    strict: RwLock<Option<bool>>,
}

impl Validator {
    /// Creates a validator with no registered fields.
    #[must_use]
    pub fn new(ruleset: Arc<Ruleset>) -> Self {
        Self {
            ruleset,
            fields: FieldRegistry::new(),
            errors: ErrorBag::new(),
            locale: RwLock::new(None),
            strict: RwLock::new(None),
        }
    }

    /// Creates a validator and attaches an initial `(field, expression)`
    /// batch in iteration order.
    #[must_use]
    pub fn with_rules<N, E>(ruleset: Arc<Ruleset>, rules: impl IntoIterator<Item = (N, E)>) -> Self
    where
        N: AsRef<str>,
        E: AsRef<str>,
    {
        let validator = Self::new(ruleset);
        for (field, expression) in rules {
            validator.attach(field.as_ref(), expression.as_ref());
        }
        validator
    }

    /// Registers a field, replacing any rule list it already had.
    ///
    /// The field's previously recorded errors are dropped.
    pub fn attach(&self, field: &str, expression: &str) {
        self.fields
            .attach(field, expression, None, self.ruleset.datetime_installed());
        self.errors.remove(field);
    }

    /// Registers a field with a display name used in rendered messages.
    pub fn attach_named(&self, field: &str, expression: &str, display_name: &str) {
        self.fields
            .attach(field, expression, Some(display_name), self.ruleset.datetime_installed());
        self.errors.remove(field);
    }

    /// Removes a field registration; returns whether it was present.
    ///
    /// Recorded errors for the field are kept so already-displayed failures
    /// stay stable; drop them explicitly with `errors().remove(field)`.
    /// In-flight deferred rules of the field can no longer write.
    pub fn detach(&self, field: &str) -> bool {
        self.fields.detach(field)
    }

    /// Validates one field's value; failures land in [`Validator::errors`].
    pub async fn validate(&self, field: &str, value: &Value) -> bool {
        let locale = self.locale();
        let strict = self.is_strict();
        Engine::new(&self.ruleset, &self.fields, &self.errors, &locale, strict)
            .validate_field(field, value)
            .await
    }

    /// Validates every entry of an ordered value map.
    ///
    /// The whole bag is cleared first; all fields are checked with no
    /// short-circuiting, and unknown fields follow the same strict policy
    /// as [`Validator::validate`].
    pub async fn validate_all(&self, values: &IndexMap<String, Value>) -> bool {
        let locale = self.locale();
        let strict = self.is_strict();
        Engine::new(&self.ruleset, &self.fields, &self.errors, &locale, strict)
            .validate_all(values)
            .await
    }

    /// The accumulated failures.
    #[must_use]
    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    /// Overrides the locale for this instance.
    ///
    /// The locale is set even when the dictionary has no entries for it;
    /// rendering then falls back per message.
    pub fn set_locale(&self, locale: &str) {
        if !self.ruleset.dictionary().has_locale(locale) {
            warn!(
                locale,
                "no dictionary entries for the chosen locale; messages render from fallbacks"
            );
        }
        *self.locale.write() = Some(locale.to_string());
    }

    /// The locale messages render in: the instance override, or the
    /// ruleset's default.
    #[must_use]
    pub fn locale(&self) -> String {
        self.locale
            .read()
            .clone()
            .unwrap_or_else(|| self.ruleset.default_locale())
    }

    /// Overrides strict mode for this instance.
    pub fn set_strict(&self, strict: bool) {
        *self.strict.write() = Some(strict);
    }

    /// The effective strict mode: the instance override, or the ruleset's
    /// default.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        (*self.strict.read()).unwrap_or_else(|| self.ruleset.strict_mode())
    }

    /// Registers a custom rule on the shared ruleset.
    pub fn extend(&self, name: impl Into<String>, extension: Extension) -> Result<(), ExtendError> {
        self.ruleset.extend(name, extension)
    }

    /// Merges message entries into the shared dictionary.
    pub fn update_dictionary<L, R>(&self, entries: impl IntoIterator<Item = (L, R, MessageFn)>)
    where
        L: Into<String>,
        R: Into<String>,
    {
        self.ruleset.update_dictionary(entries);
    }
}

// ============================================================================
// TESTS
// ============================================================================
