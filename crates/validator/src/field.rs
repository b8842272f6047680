//! Registered fields and their rule lists.

use std::collections::HashMap;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::parser::{self, RuleSpec};

// ============================================================================
// FIELD ENTRY
// ============================================================================

/// A registered field: an optional display name plus ordered rule specs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldEntry {
    /// Name used in rendered messages instead of the field key.
    pub display_name: Option<String>,
    /// Rule specs in declaration order.
    pub rules: Vec<RuleSpec>,
}

// ============================================================================
// FIELD REGISTRY
// ============================================================================

/// Insertion-ordered field map with per-field write generations.
///
/// Generations fence late error-bag writes: attach, detach and every
/// validation dispatch bump the field's token, and a deferred completion
/// only applies while it still holds the current token. Counters outlive
/// detach so a re-attached field can never collide with a stale token.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    entries: RwLock<IndexMap<String, FieldEntry>>,
    generations: Mutex<HashMap<String, u64>>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field or replaces its rule list.
    ///
    /// The expression is parsed immediately. An existing display name is
    /// kept unless a new one is given; an existing field keeps its position
    /// in iteration order.
    pub fn attach(
        &self,
        name: &str,
        expression: &str,
        display_name: Option<&str>,
        date_aware: bool,
    ) {
        let rules = parser::parse_expression(expression, date_aware);
        {
            let mut entries = self.entries.write();
            let entry = entries.entry(name.to_string()).or_default();
            entry.rules = rules;
            if let Some(display) = display_name {
                entry.display_name = Some(display.to_string());
            }
        }
        self.bump_generation(name);
        debug!(field = %name, "attached field");
    }

    /// Removes a field; returns whether it was present.
    ///
    /// Remaining fields keep their relative order.
    pub fn detach(&self, name: &str) -> bool {
        let removed = self.entries.write().shift_remove(name).is_some();
        if removed {
            self.bump_generation(name);
            debug!(field = %name, "detached field");
        }
        removed
    }

    /// Snapshot of one field's entry.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldEntry> {
        self.entries.read().get(name).cloned()
    }

    /// Whether a field is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Field names in attachment order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Advances the field's write generation and returns the new token.
    pub fn bump_generation(&self, name: &str) -> u64 {
        let mut generations = self.generations.lock();
        let counter = generations.entry(name.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Whether `token` is still the field's current generation.
    #[must_use]
    pub fn generation_current(&self, name: &str, token: u64) -> bool {
        self.generations
            .lock()
            .get(name)
            .is_some_and(|current| *current == token)
    }
}

// ============================================================================
// TESTS
// ============================================================================
