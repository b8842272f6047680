//! Locale-aware message dictionary.
//!
//! Formatters are keyed by locale and rule name. Rendering tries the active
//! locale first, then the shared default locale, then [`BASE_LOCALE`]; when
//! nothing matches, a generic text is rendered instead of failing the
//! validation pass.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::warn;

use crate::rule::MessageFn;

/// The locale the built-in catalog ships in and the last fallback step.
pub const BASE_LOCALE: &str = "en";

/// Renders the generic text used when no formatter matches a rule.
pub(crate) fn generic_message(display: &str) -> String {
    format!("The {display} value is not valid.")
}

// ============================================================================
// MESSAGE DICTIONARY
// ============================================================================

/// Locale -> rule name -> message formatter.
#[derive(Default)]
pub struct MessageDictionary {
    locales: RwLock<HashMap<String, HashMap<String, MessageFn>>>,
}

impl MessageDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a formatter for one locale and rule, overwriting any
    /// previous entry. The locale table is created on first use.
    pub fn set(&self, locale: impl Into<String>, rule: impl Into<String>, formatter: MessageFn) {
        self.locales
            .write()
            .entry(locale.into())
            .or_default()
            .insert(rule.into(), formatter);
    }

    /// Merges a batch of `(locale, rule, formatter)` entries, overwriting
    /// existing values and adding new ones.
    pub fn merge<L, R>(&self, entries: impl IntoIterator<Item = (L, R, MessageFn)>)
    where
        L: Into<String>,
        R: Into<String>,
    {
        let mut locales = self.locales.write();
        for (locale, rule, formatter) in entries {
            locales
                .entry(locale.into())
                .or_default()
                .insert(rule.into(), formatter);
        }
    }

    /// Whether the dictionary has any entries for a locale.
    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.read().contains_key(locale)
    }

    /// Looks up the formatter for a rule in one specific locale.
    #[must_use]
    pub fn lookup(&self, locale: &str, rule: &str) -> Option<MessageFn> {
        self.locales
            .read()
            .get(locale)
            .and_then(|table| table.get(rule))
            .cloned()
    }

    /// Renders the failure message for a rule.
    ///
    /// Tries `locale`, then `default_locale`, then [`BASE_LOCALE`]. A rule
    /// with no formatter anywhere renders the generic text.
    #[must_use]
    pub fn format(
        &self,
        locale: &str,
        default_locale: &str,
        rule: &str,
        display: &str,
        params: &[String],
    ) -> String {
        let formatter = {
            let locales = self.locales.read();
            [locale, default_locale, BASE_LOCALE]
                .iter()
                .find_map(|loc| locales.get(*loc).and_then(|table| table.get(rule)).cloned())
        };

        match formatter {
            Some(formatter) => formatter(display, params),
            None => {
                warn!(
                    rule,
                    locale,
                    "no message formatter registered for rule; rendering the generic text"
                );
                generic_message(display)
            }
        }
    }
}

impl std::fmt::Debug for MessageDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let locales = self.locales.read();
        let mut names: Vec<&String> = locales.keys().collect();
        names.sort();
        f.debug_struct("MessageDictionary").field("locales", &names).finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
