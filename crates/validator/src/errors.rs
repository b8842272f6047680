//! Accumulated validation failures.
//!
//! The bag is an insertion-ordered multimap from field name to rendered
//! messages. It is internally locked so the engine can append from deferred
//! rule completions through a shared reference; every read hands back a
//! snapshot.

use std::fmt;

use parking_lot::RwLock;
use serde::Serialize;

// ============================================================================
// FIELD ERROR
// ============================================================================

/// A single failure: which field, and the display-ready message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The field the failure belongs to.
    pub field: String,
    /// The localized, rendered message.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ============================================================================
// ERROR BAG
// ============================================================================

/// Ordered collection of field failures.
#[derive(Debug, Default)]
pub struct ErrorBag {
    entries: RwLock<Vec<FieldError>>,
}

impl ErrorBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a failure for a field.
    pub fn add(&self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.write().push(FieldError::new(field, message));
    }

    /// Drops every failure recorded for one field.
    pub fn remove(&self, field: &str) {
        self.entries.write().retain(|entry| entry.field != field);
    }

    /// Empties the bag.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Whether any failure is recorded.
    #[must_use]
    pub fn any(&self) -> bool {
        !self.entries.read().is_empty()
    }

    /// Total number of recorded failures.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the given field has at least one failure.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.entries.read().iter().any(|entry| entry.field == field)
    }

    /// First message recorded for the given field, if any.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<String> {
        self.entries
            .read()
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.message.clone())
    }

    /// Every message recorded for the given field, in insertion order.
    #[must_use]
    pub fn collect(&self, field: &str) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .filter(|entry| entry.field == field)
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// Every message in the bag, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// Snapshot of the full contents, in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<FieldError> {
        self.entries.read().clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================
