//! errors.rs - Custom error types for the formsieve-core library.
//!
//! Only configuration problems are errors. A value failing a rule is reported
//! through the [`ErrorBag`](crate::value::ErrorBag) returned by validation.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All configuration errors raised by `formsieve-core`.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FilterError {
    #[error("Unknown sanitize tag '{0}'")]
    UnknownSanitizeTag(String),

    #[error("Malformed rule '{1}' for field '{0}': {2}")]
    MalformedRule(String, String, &'static str),

    #[error("Unknown validation rule '{1}' for field '{0}'")]
    UnknownRule(String, String),

    #[error("Rule '{1}' on field '{0}' expects {2} parameter(s) but got {3}")]
    MissingParameters(String, String, usize, usize),

    #[error("Invalid rule set: {0}")]
    Config(#[from] anyhow::Error),
}
