//! Configuration management for `formsieve-core`.
//!
//! A [`RuleSet`] bundles everything needed to filter one kind of input: the
//! per-field rule strings, message overrides and sanitizer settings. Rule sets
//! can be written in YAML or JSON and are checked as a whole when loaded, so a
//! typo in any field is reported before the first request is filtered.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::Validator;
use crate::errors::FilterError;
use crate::filter::{split_fields, FilterOutcome, InputFilter};
use crate::messages::Messages;
use crate::rules::{builtin_rules, RuleChain};
use crate::sanitizers::{SanitizeTag, Sanitizer};
use crate::value::{ErrorBag, FieldRules, Input};

/// Sanitizer settings as written in a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerSettings {
    /// Tag applied to every field when no field has an explicit tag.
    pub default_tag: SanitizeTag,
    /// Trim surrounding whitespace after sanitizing.
    pub trim: bool,
}

impl Default for SanitizerSettings {
    fn default() -> Self {
        Self {
            default_tag: SanitizeTag::String,
            trim: true,
        }
    }
}

impl SanitizerSettings {
    pub fn build(&self) -> Sanitizer {
        Sanitizer::new()
            .with_default_tag(self.default_tag)
            .with_trim(self.trim)
    }
}

/// A complete, serializable filtering configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleSet {
    /// Combined rule strings, e.g. `name: "string|required|min:3"`.
    pub fields: FieldRules,
    #[serde(default)]
    pub messages: Messages,
    #[serde(default)]
    pub sanitizer: SanitizerSettings,
    /// Reject unknown rule names instead of skipping them.
    #[serde(default)]
    pub strict_rules: bool,
}

impl RuleSet {
    pub fn new(fields: FieldRules) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Loads and checks a rule set from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rule set from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule set file {}", path.display()))?;
        let rule_set: RuleSet = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rule set file {}", path.display()))?;

        rule_set.check()?;
        info!(
            "Loaded {} field rule(s) from file {}.",
            rule_set.fields.len(),
            path.display()
        );
        Ok(rule_set)
    }

    /// Parses and checks a rule set from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let rule_set: RuleSet =
            serde_yml::from_str(text).context("Failed to parse YAML rule set")?;
        rule_set.check()?;
        Ok(rule_set)
    }

    /// Parses and checks a rule set from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let rule_set: RuleSet =
            serde_json::from_str(text).context("Failed to parse JSON rule set")?;
        rule_set.check()?;
        Ok(rule_set)
    }

    /// Checks every sanitize tag and rule chain against the built-in rules.
    ///
    /// Unknown rule names and missing parameters only count as problems when
    /// `strict_rules` is set. All problems are collected into a single
    /// [`FilterError::Config`].
    /// Message overrides for rules nobody registered only produce a warning.
    pub fn check(&self) -> Result<(), FilterError> {
        let registry = builtin_rules();
        let validator = Validator::with_registry(registry).strict(self.strict_rules);
        let (tags, chains) = split_fields(&self.fields);
        let mut errors = Vec::new();

        for (field, tag) in &tags {
            if let Err(e) = tag.parse::<SanitizeTag>() {
                errors.push(format!("Field '{}': {}", field, e));
            }
        }

        for (field, chain) in &chains {
            let single: FieldRules = [(field.clone(), chain.clone())].into_iter().collect();
            if let Err(e) = validator.compile(&single) {
                errors.push(e.to_string());
            }
        }

        for rule in self.messages.referenced_rules() {
            if !registry.knows(rule) {
                warn!("Message override targets unknown rule '{}'.", rule);
            }
        }

        if !errors.is_empty() {
            let full_error_message = format!("Rule set validation failed:\n{}", errors.join("\n"));
            return Err(FilterError::Config(anyhow!(full_error_message)));
        }

        debug!("Rule set with {} field(s) passed checks.", self.fields.len());
        Ok(())
    }

    /// Parsed rule chains for every validated field.
    pub fn chains(&self) -> Result<Vec<RuleChain>, FilterError> {
        let (_, chains) = split_fields(&self.fields);
        chains
            .iter()
            .map(|(field, chain)| RuleChain::parse(field, chain))
            .collect()
    }

    /// The input filter described by this rule set, over the built-in rules.
    pub fn input_filter(&self) -> InputFilter<'static> {
        InputFilter::with_parts(
            self.sanitizer.build(),
            Validator::new().strict(self.strict_rules),
        )
    }

    /// Sanitizes and validates `data`, returning cleaned data and errors.
    pub fn run(&self, data: &Input) -> Result<FilterOutcome, FilterError> {
        self.input_filter().run(data, &self.fields, &self.messages)
    }

    /// Sanitizes and validates `data`, returning only the errors.
    pub fn apply(&self, data: &Input) -> Result<ErrorBag, FilterError> {
        self.run(data).map(|outcome| outcome.errors)
    }
}
