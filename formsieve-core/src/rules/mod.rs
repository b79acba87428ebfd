//! The rule interpreter.
//!
//! Rule chains such as `"required|between:3,20"` are parsed once into typed
//! [`RuleInvocation`]s by [`parser`], and rule names are resolved to checker
//! predicates and default messages through a [`RuleRegistry`].
//!
//! The built-in predicates themselves live in [`crate::validators`].

pub mod parser;
pub mod registry;

pub use parser::{RuleChain, RuleInvocation, RuleParam};
pub use registry::{builtin_rules, CheckContext, Checker, RuleDefinition, RuleRegistry};
