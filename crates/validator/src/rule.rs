//! Rule implementations and their execution outcomes.
//!
//! A rule is a named predicate over a [`serde_json::Value`] plus positional
//! string parameters. Synchronous rules answer immediately; deferred rules
//! hand back a future that settles later. Both shapes flow through
//! [`Outcome`] so the engine dispatches on an explicit tag instead of
//! probing what a rule happened to return.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

// ============================================================================
// FUNCTION TYPES
// ============================================================================

/// A rule implementation: `(value, params) -> Outcome`.
pub type RuleFn = Arc<dyn Fn(&Value, &[String]) -> Outcome + Send + Sync>;

/// A message formatter: `(display_name, params) -> text`.
pub type MessageFn = Arc<dyn Fn(&str, &[String]) -> String + Send + Sync>;

/// Wraps a closure as a [`MessageFn`].
///
/// Dictionary updates take boxed formatters; this keeps call sites short:
///
/// ```rust,ignore
/// ruleset.update_dictionary([("nl", "required", message(|field, _| {
///     format!("{field} is verplicht.")
/// }))]);
/// ```
pub fn message<F>(formatter: F) -> MessageFn
where
    F: Fn(&str, &[String]) -> String + Send + Sync + 'static,
{
    Arc::new(formatter)
}

// ============================================================================
// OUTCOME
// ============================================================================

/// What a single rule invocation produced.
pub enum Outcome {
    /// The rule decided synchronously.
    Immediate(bool),
    /// The rule must be awaited; the future resolves to a [`Settled`] payload.
    Deferred(BoxFuture<'static, Settled>),
}

impl Outcome {
    /// Boxes a future into a deferred outcome.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Settled> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }
}

impl From<bool> for Outcome {
    fn from(valid: bool) -> Self {
        Self::Immediate(valid)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(valid) => f.debug_tuple("Immediate").field(valid).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

// ============================================================================
// SETTLED PAYLOADS
// ============================================================================

/// The payload a deferred rule settles with.
///
/// Remote checks sometimes report one verdict per probed item; [`Settled::Many`]
/// keeps those sub-results intact and collapses them with logical AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// A single verdict.
    One(bool),
    /// Per-item verdicts; the rule passes only when every one of them does.
    Many(Vec<SubCheck>),
}

impl Settled {
    /// Collapses the payload into one verdict.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::One(valid) => *valid,
            Self::Many(checks) => checks.iter().all(|check| check.valid),
        }
    }
}

impl From<bool> for Settled {
    fn from(valid: bool) -> Self {
        Self::One(valid)
    }
}

/// One sub-result inside [`Settled::Many`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCheck {
    /// Whether this sub-check passed.
    pub valid: bool,
}

impl From<bool> for SubCheck {
    fn from(valid: bool) -> Self {
        Self { valid }
    }
}

// ============================================================================
// EXTENSION SHAPES
// ============================================================================

/// The input shapes accepted by rule registration.
pub enum Extension {
    /// A bare predicate. Registration installs a generic base-locale message
    /// for it so failures always render something.
    Predicate(RuleFn),
    /// A full definition carrying its own message sources.
    Definition(RuleDefinition),
}

impl Extension {
    /// Wraps a closure as a predicate-shaped extension.
    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(&Value, &[String]) -> Outcome + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(check))
    }
}

/// The definition shape: a check function plus message sources.
///
/// All parts are optional while the value is being built; registration
/// rejects definitions that lack a check or carry no message source at all.
#[derive(Default)]
pub struct RuleDefinition {
    pub(crate) check: Option<RuleFn>,
    pub(crate) message: Option<MessageFn>,
    pub(crate) messages: Vec<(String, MessageFn)>,
}

impl RuleDefinition {
    /// Creates an empty definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the check function.
    #[must_use]
    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value, &[String]) -> Outcome + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(check));
        self
    }

    /// Sets the base-locale message formatter.
    #[must_use]
    pub fn with_message<F>(mut self, message: F) -> Self
    where
        F: Fn(&str, &[String]) -> String + Send + Sync + 'static,
    {
        self.message = Some(Arc::new(message));
        self
    }

    /// Adds a message formatter for one locale.
    #[must_use]
    pub fn with_localized<F>(mut self, locale: impl Into<String>, message: F) -> Self
    where
        F: Fn(&str, &[String]) -> String + Send + Sync + 'static,
    {
        self.messages.push((locale.into(), Arc::new(message)));
        self
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("check", &self.check.is_some())
            .field("message", &self.message.is_some())
            .field("locales", &self.messages.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
