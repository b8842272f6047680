//! Process-scoped shared validation state.
//!
//! A [`Ruleset`] bundles the rule registry, the message dictionary and the
//! shared defaults (locale, strict mode, date capability). Validators hold
//! it behind an [`std::sync::Arc`]; mutating operations go through `&self`
//! so extension at runtime needs no exclusive access.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::dictionary::{BASE_LOCALE, MessageDictionary, generic_message};
use crate::registry::{ExtendError, RuleRegistry};
use crate::rule::{Extension, MessageFn, RuleFn, message};

// ============================================================================
// DATE CAPABILITY
// ============================================================================

/// Supplies date validation rules and their messages.
///
/// The engine itself knows nothing about dates; a provider is installed
/// explicitly through [`Ruleset::install_datetime`]. Installation also
/// switches the expression parser into date-aware mode, which lets the
/// comparison rules borrow a field's `date_format` parameter.
pub trait DateTimeProvider {
    /// The rules to register, as `(name, extension)` pairs.
    fn rules(&self) -> Vec<(String, Extension)>;

    /// Message entries to merge, as `(locale, rule, formatter)` triples.
    fn messages(&self) -> Vec<(String, String, MessageFn)>;
}

// ============================================================================
// RULESET
// ============================================================================

/// Shared registry, dictionary and validation defaults.
#[derive(Debug)]
pub struct Ruleset {
    registry: RuleRegistry,
    dictionary: MessageDictionary,
    default_locale: RwLock<String>,
    strict: AtomicBool,
    date_enabled: AtomicBool,
}

impl Ruleset {
    /// Creates an empty ruleset: no rules, no messages, default locale
    /// [`BASE_LOCALE`], strict mode on, date capability off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::new(),
            dictionary: MessageDictionary::new(),
            default_locale: RwLock::new(BASE_LOCALE.to_string()),
            strict: AtomicBool::new(true),
            date_enabled: AtomicBool::new(false),
        }
    }

    /// Creates a ruleset pre-seeded with the built-in rule catalog and its
    /// base-locale messages.
    #[must_use]
    pub fn with_builtins() -> Self {
        let ruleset = Self::new();
        crate::rules::install(&ruleset)
            .expect("builtin rule names cannot collide in an empty ruleset");
        crate::messages::install(&ruleset.dictionary);
        ruleset
    }

    /// Registers a custom rule under a unique name.
    ///
    /// A [`Extension::Predicate`] gets a generic base-locale message so its
    /// failures always render. A [`Extension::Definition`] must carry a
    /// check function and at least one message source; its messages merge
    /// into the dictionary.
    pub fn extend(&self, name: impl Into<String>, extension: Extension) -> Result<(), ExtendError> {
        let name = name.into();
        if self.registry.contains(&name) {
            return Err(ExtendError::Conflict(name));
        }

        match extension {
            Extension::Predicate(check) => {
                self.registry.insert(name.clone(), check)?;
                self.dictionary
                    .set(BASE_LOCALE, name, message(|field, _| generic_message(field)));
            }
            Extension::Definition(definition) => {
                let check = definition
                    .check
                    .ok_or_else(|| ExtendError::MissingCheck(name.clone()))?;
                if definition.message.is_none() && definition.messages.is_empty() {
                    return Err(ExtendError::MissingMessage(name));
                }

                self.registry.insert(name.clone(), check)?;
                if let Some(formatter) = definition.message {
                    self.dictionary.set(BASE_LOCALE, name.clone(), formatter);
                }
                for (locale, formatter) in definition.messages {
                    self.dictionary.set(locale, name.clone(), formatter);
                }
            }
        }
        Ok(())
    }

    /// Merges `(locale, rule, formatter)` entries into the dictionary,
    /// overwriting existing values and adding new ones.
    pub fn update_dictionary<L, R>(&self, entries: impl IntoIterator<Item = (L, R, MessageFn)>)
    where
        L: Into<String>,
        R: Into<String>,
    {
        self.dictionary.merge(entries);
    }

    /// Sets the locale used by validators without a locale override.
    ///
    /// The locale is set even when the dictionary has no entries for it;
    /// rendering then falls back per message.
    pub fn set_default_locale(&self, locale: &str) {
        if !self.dictionary.has_locale(locale) {
            warn!(
                locale,
                "no dictionary entries for the new default locale; messages render from fallbacks"
            );
        }
        *self.default_locale.write() = locale.to_string();
    }

    /// The locale validators fall back to when they carry no override.
    #[must_use]
    pub fn default_locale(&self) -> String {
        self.default_locale.read().clone()
    }

    /// Sets the strict default for validators without a strict override.
    ///
    /// Strict mode fails validation of fields that were never attached;
    /// non-strict mode skips them as valid.
    pub fn set_strict_mode(&self, strict: bool) {
        self.strict.store(strict, Ordering::Release);
    }

    /// The shared strict default.
    #[must_use]
    pub fn strict_mode(&self) -> bool {
        self.strict.load(Ordering::Acquire)
    }

    /// Installs a date capability: its rules, its messages, and date-aware
    /// expression parsing.
    ///
    /// Installation is idempotent; a second call is a no-op returning
    /// `Ok(false)`. A name conflict aborts the install and leaves the
    /// capability off; provider rules registered before the conflicting
    /// one stay registered, without their messages. Resolve the clash on
    /// a fresh ruleset rather than retrying on this one.
    pub fn install_datetime(&self, provider: &dyn DateTimeProvider) -> Result<bool, ExtendError> {
        if self.date_enabled.load(Ordering::Acquire) {
            debug!("date validation is already installed");
            return Ok(false);
        }

        for (name, extension) in provider.rules() {
            self.extend(name, extension)?;
        }
        self.dictionary.merge(provider.messages());
        self.date_enabled.store(true, Ordering::Release);
        debug!("installed date validation rules");
        Ok(true)
    }

    /// Whether a date capability has been installed.
    #[must_use]
    pub fn datetime_installed(&self) -> bool {
        self.date_enabled.load(Ordering::Acquire)
    }

    /// The shared rule registry.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// The shared message dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &MessageDictionary {
        &self.dictionary
    }

    /// Looks up a rule implementation by name.
    pub(crate) fn rule(&self, name: &str) -> Option<RuleFn> {
        self.registry.get(name)
    }

    /// Renders a failure message through the locale fallback chain.
    pub(crate) fn format_message(
        &self,
        locale: &str,
        rule: &str,
        display: &str,
        params: &[String],
    ) -> String {
        let default_locale = self.default_locale();
        self.dictionary.format(locale, &default_locale, rule, display, params)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
