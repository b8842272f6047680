//! Prelude module for convenient imports.
//!
//! Provides a single `use veld::prelude::*;` import that brings in the
//! types needed for everyday validation work.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use veld::prelude::*;
//!
//! let rules = Arc::new(Ruleset::with_builtins());
//! let validator = Validator::new(rules);
//! validator.attach("email", "required|email");
//! ```

// ============================================================================
// FACADE: Shared configuration and per-consumer validators
// ============================================================================

pub use crate::ruleset::{DateTimeProvider, Ruleset};
pub use crate::validator::Validator;

// ============================================================================
// RULES: Extension points and check outcomes
// ============================================================================

pub use crate::registry::ExtendError;
pub use crate::rule::{
    Extension, MessageFn, Outcome, RuleDefinition, RuleFn, Settled, SubCheck, message,
};

// ============================================================================
// RESULTS: Failure reporting
// ============================================================================

pub use crate::dictionary::{BASE_LOCALE, MessageDictionary};
pub use crate::errors::{ErrorBag, FieldError};

// ============================================================================
// EXPRESSIONS: Parsed rule records
// ============================================================================

pub use crate::parser::RuleSpec;
