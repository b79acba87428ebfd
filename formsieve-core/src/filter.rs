// formsieve-core/src/filter.rs
//! `filter.rs`
//! One-shot sanitize-then-validate over combined rule strings.
//!
//! Each field's rule string is split at its first `|`: the left side is the
//! sanitize tag, the right side the validation chain. A string without `|`
//! is only a sanitize tag and the field is not validated.

use log::debug;
use std::collections::BTreeMap;

use crate::engine::Validator;
use crate::errors::FilterError;
use crate::messages::Messages;
use crate::sanitizers::Sanitizer;
use crate::value::{ErrorBag, FieldRules, Input};

/// Cleaned data together with the validation result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterOutcome {
    pub data: Input,
    pub errors: ErrorBag,
}

impl FilterOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Splits combined rule strings into sanitize tags and validation chains.
pub fn split_fields(fields: &FieldRules) -> (BTreeMap<String, String>, FieldRules) {
    let mut tags = BTreeMap::new();
    let mut chains = FieldRules::new();

    for (field, rules) in fields {
        match rules.split_once('|') {
            Some((tag, chain)) => {
                tags.insert(field.clone(), tag.trim().to_string());
                chains.insert(field.clone(), chain.to_string());
            }
            None => {
                tags.insert(field.clone(), rules.trim().to_string());
            }
        }
    }

    (tags, chains)
}

/// Sequences a [`Sanitizer`] and a [`Validator`].
#[derive(Debug, Clone)]
pub struct InputFilter<'r> {
    sanitizer: Sanitizer,
    validator: Validator<'r>,
}

impl Default for InputFilter<'static> {
    fn default() -> Self {
        Self::with_parts(Sanitizer::default(), Validator::default())
    }
}

impl InputFilter<'static> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'r> InputFilter<'r> {
    pub fn with_parts(sanitizer: Sanitizer, validator: Validator<'r>) -> Self {
        Self {
            sanitizer,
            validator,
        }
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn validator(&self) -> &Validator<'r> {
        &self.validator
    }

    /// Sanitizes and validates, returning both the cleaned data and the errors.
    ///
    /// All rule strings are checked before any data is touched.
    pub fn run(
        &self,
        data: &Input,
        fields: &FieldRules,
        messages: &Messages,
    ) -> Result<FilterOutcome, FilterError> {
        let (tags, chains) = split_fields(fields);
        let compiled = self.validator.compile(&chains)?;
        let cleaned = self.sanitizer.sanitize(data, &tags)?;

        debug!(
            "Validating {} of {} field(s) after sanitization.",
            compiled.len(),
            fields.len()
        );
        let errors = self.validator.run(&cleaned, &compiled, messages);

        Ok(FilterOutcome {
            data: cleaned,
            errors,
        })
    }

    /// Sanitizes and validates, returning only the errors.
    pub fn filter(
        &self,
        data: &Input,
        fields: &FieldRules,
        messages: &Messages,
    ) -> Result<ErrorBag, FilterError> {
        self.run(data, fields, messages).map(|outcome| outcome.errors)
    }
}

/// Sanitizes and validates with the default sanitizer and built-in rules.
///
/// # Arguments
///
/// * `data` - Raw input, e.g. a deserialized form body.
/// * `fields` - Combined rule strings such as `"string|required|min:3"`.
/// * `messages` - Optional message overrides; pass `&Messages::new()` for none.
pub fn filter(
    data: &Input,
    fields: &FieldRules,
    messages: &Messages,
) -> Result<ErrorBag, FilterError> {
    InputFilter::new().filter(data, fields, messages)
}
