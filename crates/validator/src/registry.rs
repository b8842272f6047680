//! Named rule storage with duplicate protection.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::debug;

use crate::rule::RuleFn;

// ============================================================================
// EXTEND ERROR
// ============================================================================

/// Errors raised while registering a rule.
///
/// These are developer errors and fail fast; validation itself never
/// produces them.
#[derive(Debug, thiserror::Error)]
pub enum ExtendError {
    /// A rule with this name is already registered.
    #[error("a rule named '{0}' is already registered")]
    Conflict(String),

    /// A definition-shaped extension did not provide a check function.
    #[error("the rule '{0}' must provide a check function")]
    MissingCheck(String),

    /// A definition-shaped extension provided no message source at all.
    #[error("the rule '{0}' must provide a message or localized messages")]
    MissingMessage(String),
}

// ============================================================================
// RULE REGISTRY
// ============================================================================

/// Name -> implementation map shared by every validator on a ruleset.
///
/// Entries are normalized [`RuleFn`]s; the registration shapes are reduced
/// to this single record before they land here.
#[derive(Default)]
pub struct RuleRegistry {
    rules: RwLock<HashMap<String, RuleFn>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an implementation under a unique name.
    pub fn insert(&self, name: impl Into<String>, rule: RuleFn) -> Result<(), ExtendError> {
        let name = name.into();
        let mut rules = self.rules.write();
        if rules.contains_key(&name) {
            return Err(ExtendError::Conflict(name));
        }

        debug!(rule = %name, "registered validation rule");
        rules.insert(name, rule);
        Ok(())
    }

    /// Fetches the implementation registered under a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<RuleFn> {
        self.rules.read().get(name).cloned()
    }

    /// Whether a rule is registered under this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    /// Registered rule names, sorted for stable output.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    /// Whether the registry has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry").field("rules", &self.names()).finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Outcome;
    use std::sync::Arc;

    fn always_pass() -> RuleFn {
        Arc::new(|_, _| Outcome::Immediate(true))
    }

    #[test]
    fn test_insert_and_get() {
        let registry = RuleRegistry::new();
        registry.insert("required", always_pass()).unwrap();

        assert!(registry.contains("required"));
        assert!(registry.get("required").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let registry = RuleRegistry::new();
        registry.insert("required", always_pass()).unwrap();

        let err = registry.insert("required", always_pass()).unwrap_err();
        assert!(matches!(err, ExtendError::Conflict(name) if name == "required"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = RuleRegistry::new();
        registry.insert("min", always_pass()).unwrap();
        registry.insert("alpha", always_pass()).unwrap();
        registry.insert("required", always_pass()).unwrap();

        assert_eq!(registry.names(), vec!["alpha", "min", "required"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.names(), Vec::<String>::new());
    }
}
