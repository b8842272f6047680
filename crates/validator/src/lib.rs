//! # veld
//!
//! A declarative, runtime-extensible value validation engine.
//!
//! Fields are bound to pipe-delimited rule expressions such as
//! `required|min:8|email`. Validation runs every rule, collects one
//! localized message per failing rule into an ordered [`ErrorBag`], and
//! reports a single boolean verdict. Rules may settle immediately or
//! hand back a future, and either kind can be registered at runtime.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use veld::prelude::*;
//!
//! let rules = Arc::new(Ruleset::with_builtins());
//! let validator = Validator::new(rules);
//!
//! validator.attach("email", "required|email");
//! validator.attach("password", "required|min:8");
//!
//! let ok = validator.validate("email", &serde_json::json!("not-an-email")).await;
//! assert!(!ok);
//! assert_eq!(
//!     validator.errors().first("email").as_deref(),
//!     Some("The email must be a valid email."),
//! );
//! ```
//!
//! ## Extending
//!
//! Register new rules on the shared [`Ruleset`] with [`Ruleset::extend`]:
//! a bare predicate gets a generic message, or a [`RuleDefinition`] can
//! carry its own message formatters per locale. Date rules live in a
//! separate crate and plug in through [`DateTimeProvider`].

pub mod dictionary;
mod engine;
pub mod errors;
pub mod field;
pub mod messages;
pub mod parser;
pub mod prelude;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod ruleset;
pub mod validator;

pub use dictionary::{BASE_LOCALE, MessageDictionary};
pub use errors::{ErrorBag, FieldError};
pub use parser::RuleSpec;
pub use registry::ExtendError;
pub use rule::{Extension, MessageFn, Outcome, RuleDefinition, RuleFn, Settled, SubCheck, message};
pub use ruleset::{DateTimeProvider, Ruleset};
pub use validator::Validator;
