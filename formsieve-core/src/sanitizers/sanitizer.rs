//! sanitizer.rs - Applies sanitize tags across an input record.
//!
//! License: MIT OR APACHE 2.0

use formsieve_charset::trim_blank;
use log::debug;
use std::collections::BTreeMap;

use crate::errors::FilterError;
use crate::sanitizers::tags::SanitizeTag;
use crate::value::{FieldValue, Input};

/// Cleans input records field by field.
///
/// With an empty tag map every field is cleaned with `default_tag`, lists
/// element by element. With a non-empty map only the listed fields are
/// cleaned, a value whose shape does not fit its tag is rejected, and the rest
/// pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitizer {
    default_tag: SanitizeTag,
    trim: bool,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            default_tag: SanitizeTag::String,
            trim: true,
        }
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_tag(mut self, tag: SanitizeTag) -> Self {
        self.default_tag = tag;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn default_tag(&self) -> SanitizeTag {
        self.default_tag
    }

    pub fn trims(&self) -> bool {
        self.trim
    }

    /// Sanitizes `input` using tag names as they appear in rule strings.
    ///
    /// Every tag name is resolved before any field is touched, so an unknown
    /// tag fails the whole call.
    pub fn sanitize(
        &self,
        input: &Input,
        field_tags: &BTreeMap<String, String>,
    ) -> Result<Input, FilterError> {
        let tags = field_tags
            .iter()
            .map(|(field, tag)| Ok((field.clone(), tag.parse::<SanitizeTag>()?)))
            .collect::<Result<BTreeMap<String, SanitizeTag>, FilterError>>()?;

        Ok(self.sanitize_with_tags(input, &tags))
    }

    /// Sanitizes `input` with already-resolved tags.
    pub fn sanitize_with_tags(&self, input: &Input, tags: &BTreeMap<String, SanitizeTag>) -> Input {
        debug!(
            "Sanitizing {} field(s) with {} explicit tag(s).",
            input.len(),
            tags.len()
        );

        input
            .iter()
            .map(|(field, value)| {
                let cleaned = if tags.is_empty() {
                    self.default_tag.apply_each(value)
                } else {
                    match tags.get(field) {
                        Some(tag) => self.apply_tag(field, *tag, value),
                        None => value.clone(),
                    }
                };
                let cleaned = if self.trim { trim_value(&cleaned) } else { cleaned };
                (field.clone(), cleaned)
            })
            .collect()
    }

    fn apply_tag(&self, field: &str, tag: SanitizeTag, value: &FieldValue) -> FieldValue {
        match tag.apply(value) {
            Some(cleaned) => cleaned,
            None => {
                debug!(
                    "Rejected value of field '{}': shape does not fit sanitize tag '{}'.",
                    field, tag
                );
                FieldValue::Null
            }
        }
    }
}

/// Trims every text value, descending into lists. Other values are cloned as is.
pub fn trim_value(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(text) => FieldValue::Text(trim_blank(text).to_string()),
        FieldValue::List(items) => FieldValue::List(items.iter().map(trim_value).collect()),
        other => other.clone(),
    }
}

/// Sanitizes with the default settings: `string` as default tag, trimming on.
pub fn sanitize(
    input: &Input,
    field_tags: &BTreeMap<String, String>,
) -> Result<Input, FilterError> {
    Sanitizer::default().sanitize(input, field_tags)
}
