//! # veld-datetime
//!
//! Date validation rules for [`veld`], backed by chrono.
//!
//! The core engine knows nothing about dates; this crate supplies the
//! capability as a [`veld::DateTimeProvider`]. Installing [`DateRules`]
//! registers four rules and their English messages:
//!
//! - `date_format:FORMAT` — strict parse under a token format
//! - `after:TARGET[,FORMAT]` — strictly later than the target date
//! - `before:TARGET[,FORMAT]` — strictly earlier than the target date
//! - `date_between:MIN,MAX[,FORMAT]` — strictly inside an exclusive range
//!
//! Formats use the `YYYY`/`MM`/`DD`/`HH`/`mm`/`ss` token vocabulary.
//! Installation also turns on date-aware expression parsing: a comparison
//! rule declared after a `date_format` segment borrows its format, so
//! `date_format:DD/MM/YYYY|after:01/01/2026` compares in the field's own
//! format without repeating it.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use veld::{Ruleset, Validator};
//! use veld_datetime::DateRules;
//!
//! let ruleset = Ruleset::with_builtins();
//! ruleset.install_datetime(&DateRules)?;
//!
//! let validator = Validator::new(Arc::new(ruleset));
//! validator.attach("expires", "required|date_format:DD/MM/YYYY|after:01/01/2026");
//! ```

pub mod format;
pub mod rules;

pub use format::{parse_date, to_strftime};
pub use rules::DateRules;
