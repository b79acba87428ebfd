// formsieve-core/src/lib.rs
//! # formsieve Core Library
//!
//! `formsieve-core` sanitizes and validates associative input such as form or
//! request data. Constraints are written as compact rule strings:
//!
//! ```text
//! "string|required|min:3"
//!  ^^^^^^ ^^^^^^^^^^^^^^^
//!  sanitize tag   validation chain
//! ```
//!
//! The library is pure and synchronous. Every call builds its own state; the
//! only shared data are the read-only built-in rule registry and compiled
//! patterns, so all types can be used from many threads at once.
//!
//! ## Modules
//!
//! * `value`: The [`FieldValue`] model and the [`Input`] / [`ErrorBag`] maps.
//! * `sanitizers`: Sanitize tags and the [`Sanitizer`] that applies them.
//! * `rules`: Rule-string parsing and the [`RuleRegistry`].
//! * `validators`: The built-in rule checkers.
//! * `messages`: Message overrides and printf-style templating.
//! * `engine`: The [`Validator`] that runs rule chains.
//! * `filter`: The sanitize-then-validate façade.
//! * `config`: Serializable [`RuleSet`]s loaded from YAML or JSON.
//! * `phone`: Region-aware phone validation over the `phonenumber` crate.
//! * `errors`: The [`FilterError`] configuration error type.
//!
//! ## Usage Example
//!
//! ```rust
//! use formsieve_core::{filter, FieldRules, Input, Messages};
//! use serde_json::json;
//!
//! let data: Input = serde_json::from_value(json!({
//!     "name": "  Al ",
//!     "email": "al@example",
//! }))
//! .unwrap();
//!
//! let fields: FieldRules = [
//!     ("name".to_string(), "string|required|min:3".to_string()),
//!     ("email".to_string(), "email|required|email".to_string()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let messages = Messages::new().with_field("name", "min", "Name is too short");
//! let errors = filter(&data, &fields, &messages).unwrap();
//!
//! assert_eq!(errors["name"], "Name is too short");
//! assert_eq!(errors["email"], "The email is not a valid email address");
//! ```
//!
//! ## Error Handling
//!
//! A value failing a rule is not an error: it is an entry in the returned
//! [`ErrorBag`]. [`FilterError`] is reserved for configuration mistakes such
//! as unknown sanitize tags or malformed rule strings. Unknown rule names are
//! skipped unless the validator runs in strict mode.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod messages;
pub mod phone;
pub mod rules;
pub mod sanitizers;
pub mod validators;
pub mod value;

/// Re-exports the rule set configuration types.
pub use config::{RuleSet, SanitizerSettings};

/// Re-exports the custom error type for clear error reporting.
pub use errors::FilterError;

/// Re-exports the validation engine.
pub use engine::{validate, Validator};

/// Re-exports the sanitize-then-validate façade.
pub use filter::{filter, split_fields, FilterOutcome, InputFilter};

/// Re-exports message overrides and templating.
pub use messages::{format_template, MessageTable, Messages};

/// Re-exports the rule interpreter types for custom rules.
pub use rules::{
    builtin_rules, CheckContext, Checker, RuleChain, RuleDefinition, RuleInvocation, RuleParam,
    RuleRegistry,
};

/// Re-exports the sanitizer.
pub use sanitizers::{sanitize, SanitizeTag, Sanitizer};

/// Re-exports the value model.
pub use value::{ErrorBag, FieldRules, FieldValue, Input};
