// formsieve-core/src/engine.rs
//! The validation engine.
//!
//! [`Validator`] parses every field's rule chain, resolves rule names through
//! a [`RuleRegistry`], runs the checkers against the data and formats one
//! message per failing field. Rules run left to right and all of them run:
//! when several fail, the message of the last failing rule is the one kept.
//!
//! License: MIT OR APACHE 2.0

use chrono::{Local, NaiveDate};
use log::debug;

use crate::errors::FilterError;
use crate::messages::{format_template, MessageTable, Messages};
use crate::rules::{builtin_rules, CheckContext, RuleChain, RuleRegistry};
use crate::value::{ErrorBag, FieldRules, Input};

/// Template for a rule with no message in the registry or the overrides.
const FALLBACK_TEMPLATE: &str = "The %s is invalid";

/// Runs rule chains against input data.
#[derive(Debug, Clone)]
pub struct Validator<'r> {
    registry: &'r RuleRegistry,
    strict: bool,
    today: Option<NaiveDate>,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::with_registry(builtin_rules())
    }
}

impl Validator<'static> {
    /// A lenient validator over the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'r> Validator<'r> {
    pub fn with_registry(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            strict: false,
            today: None,
        }
    }

    /// In strict mode unknown rule names and rules given fewer parameters
    /// than they take are configuration errors. Otherwise the former are
    /// skipped and the latter simply fail their checker.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Pins the date used by age rules. Defaults to the local date at call time.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn registry(&self) -> &'r RuleRegistry {
        self.registry
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parses every rule chain without running any rule.
    ///
    /// Only a token with an empty rule name fails in lenient mode. Strict mode
    /// also rejects unknown names and missing parameters.
    pub fn compile(&self, rules: &FieldRules) -> Result<Vec<RuleChain>, FilterError> {
        rules
            .iter()
            .map(|(field, chain)| {
                let chain = RuleChain::parse(field, chain)?;
                self.check_chain(&chain)?;
                Ok(chain)
            })
            .collect()
    }

    fn check_chain(&self, chain: &RuleChain) -> Result<(), FilterError> {
        if !self.strict {
            return Ok(());
        }
        for rule in chain.iter() {
            match self.registry.get(&rule.name) {
                Some(definition) if rule.params.len() < definition.arity() => {
                    return Err(FilterError::MissingParameters(
                        chain.field.clone(),
                        rule.name.clone(),
                        definition.arity(),
                        rule.params.len(),
                    ));
                }
                Some(_) => {}
                None => {
                    return Err(FilterError::UnknownRule(
                        chain.field.clone(),
                        rule.name.clone(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Validates `data` against per-field rule chains.
    ///
    /// Returns one message per failing field; an empty bag means everything
    /// passed. In lenient mode the only error is a token with no rule name.
    pub fn validate(
        &self,
        data: &Input,
        rules: &FieldRules,
        messages: &Messages,
    ) -> Result<ErrorBag, FilterError> {
        let chains = self.compile(rules)?;
        Ok(self.run(data, &chains, messages))
    }

    /// Runs already compiled chains. Unknown rule names are skipped.
    pub fn run(&self, data: &Input, chains: &[RuleChain], messages: &Messages) -> ErrorBag {
        let table = MessageTable::merge(self.registry, messages);
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let mut errors = ErrorBag::new();

        for chain in chains {
            let ctx = CheckContext::new(data, &chain.field, today);

            for rule in chain.iter() {
                let Some(definition) = self.registry.get(&rule.name) else {
                    debug!(
                        "Skipping unknown rule '{}' on field '{}'.",
                        rule.name, chain.field
                    );
                    continue;
                };

                if definition.check(&ctx, &rule.params) {
                    continue;
                }

                let template = table
                    .template_for(&chain.field, &rule.name)
                    .unwrap_or(FALLBACK_TEMPLATE);
                let message = format_template(template, &rule.message_args(&chain.field));
                debug!("Field '{}' failed rule '{}'.", chain.field, rule.name);
                errors.insert(chain.field.clone(), message);
            }
        }

        errors
    }
}

/// Validates with the built-in rules in lenient mode.
pub fn validate(
    data: &Input,
    rules: &FieldRules,
    messages: &Messages,
) -> Result<ErrorBag, FilterError> {
    Validator::new().validate(data, rules, messages)
}
