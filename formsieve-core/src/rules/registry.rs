//! registry.rs - Maps rule names to checker predicates and default messages.
//!
//! The built-in registry is constructed once and shared read-only by every
//! validator. Callers that need extra rules clone it (or start from
//! [`RuleRegistry::empty`]) and register their own before validating.
//!
//! License: MIT OR APACHE 2.0

use chrono::NaiveDate;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::rules::parser::RuleParam;
use crate::validators;
use crate::value::{FieldValue, Input};

/// Everything a checker may look at while deciding a single rule.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    data: &'a Input,
    field: &'a str,
    today: NaiveDate,
}

impl<'a> CheckContext<'a> {
    pub fn new(data: &'a Input, field: &'a str, today: NaiveDate) -> Self {
        Self { data, field, today }
    }

    pub fn data(&self) -> &'a Input {
        self.data
    }

    pub fn field(&self) -> &'a str {
        self.field
    }

    /// The date age-based rules measure against.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The checked field's value, or `None` when it is missing or null.
    pub fn value(&self) -> Option<&'a FieldValue> {
        self.value_of(self.field)
    }

    /// Another field's value, with the same absence semantics as [`Self::value`].
    pub fn value_of(&self, field: &str) -> Option<&'a FieldValue> {
        self.data.get(field).filter(|v| !v.is_null())
    }
}

/// A rule predicate. Returns `true` when the field passes.
pub type Checker = Arc<dyn Fn(&CheckContext<'_>, &[RuleParam]) -> bool + Send + Sync>;

/// A registered rule: its checker, default message and parameter count.
#[derive(Clone)]
pub struct RuleDefinition {
    checker: Checker,
    message: String,
    arity: usize,
}

impl RuleDefinition {
    pub fn new<F>(arity: usize, message: impl Into<String>, checker: F) -> Self
    where
        F: Fn(&CheckContext<'_>, &[RuleParam]) -> bool + Send + Sync + 'static,
    {
        Self {
            checker: Arc::new(checker),
            message: message.into(),
            arity,
        }
    }

    pub fn check(&self, ctx: &CheckContext<'_>, params: &[RuleParam]) -> bool {
        (self.checker)(ctx, params)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Minimum number of parameters the rule needs.
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("message", &self.message)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

type BuiltinChecker = fn(&CheckContext<'_>, &[RuleParam]) -> bool;

/// Built-in rules: name, parameter count, default message, checker.
const BUILTINS: &[(&str, usize, &str, BuiltinChecker)] = &[
    ("required", 0, "Please enter the %s", validators::is_required),
    ("email", 0, "The %s is not a valid email address", validators::is_email),
    ("min", 1, "The %s must have at least %s characters", validators::is_min),
    ("max", 1, "The %s must have at most %s characters", validators::is_max),
    (
        "between",
        2,
        "The %s must have between %d and %d characters",
        validators::is_between,
    ),
    ("same", 1, "The %s must match with %s", validators::is_same),
    (
        "alphanumeric",
        0,
        "The %s should have only letters and numbers",
        validators::is_alphanumeric,
    ),
    (
        "secure",
        0,
        "The %s must have between 8 and 64 characters and contain at least one number, one upper case letter, one lower case letter and one special character example (!@#$%^&*+_)",
        validators::is_secure,
    ),
    ("number", 0, "The %s must be numeric", validators::is_number),
    ("phone", 0, "The %s must be a valid phone number", validators::is_phone),
    ("url", 0, "The %s must be a valid URL", validators::is_url),
    ("iso", 1, "The %s must be a valid phone number", validators::is_iso),
    (
        "minAge",
        1,
        "The %s must be older than the minimum age",
        validators::is_min_age,
    ),
];

/// Rules that have a message but no checker. Validation skips them.
const DECLARED_ONLY: &[(&str, &str)] = &[("unique", "The %s already exists")];

/// Rule name to definition lookup, plus the default message table.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleDefinition>,
    messages: HashMap<String, String>,
}

impl RuleRegistry {
    /// A registry with no rules at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh registry holding every built-in rule.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for &(name, arity, message, checker) in BUILTINS {
            registry.register(name, RuleDefinition::new(arity, message, checker));
        }
        for &(name, message) in DECLARED_ONLY {
            registry.declare_message(name, message);
        }
        registry
    }

    /// Registers (or replaces) a rule.
    pub fn register(&mut self, name: impl Into<String>, definition: RuleDefinition) -> &mut Self {
        let name = name.into();
        self.messages
            .insert(name.clone(), definition.message().to_string());
        self.rules.insert(name, definition);
        self
    }

    /// Records a default message for a rule name without a checker.
    pub fn declare_message(
        &mut self,
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> &mut Self {
        self.messages.insert(name.into(), template.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuleDefinition> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// `true` when the name has a checker or at least a declared message.
    pub fn knows(&self, name: &str) -> bool {
        self.messages.contains_key(name)
    }

    pub fn default_message(&self, name: &str) -> Option<&str> {
        self.messages.get(name).map(String::as_str)
    }

    pub fn default_messages(&self) -> &HashMap<String, String> {
        &self.messages
    }

    /// Names of all rules with a checker, sorted.
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rule_names())
            .finish_non_exhaustive()
    }
}

lazy_static! {
    /// The process-wide, read-only registry of built-in rules.
    static ref BUILTIN_RULES: RuleRegistry = RuleRegistry::with_builtins();
}

/// The shared built-in registry.
pub fn builtin_rules() -> &'static RuleRegistry {
    &BUILTIN_RULES
}
