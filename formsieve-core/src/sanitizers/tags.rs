//! tags.rs - The fixed set of sanitize tags and what each one keeps.
//!
//! License: MIT OR APACHE 2.0

use formsieve_charset::{keep_class, strip_markup, CharClass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FilterError;
use crate::value::FieldValue;

/// Identifies how a field's raw value is cleaned.
///
/// The `[]` variants expect a list and clean every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SanitizeTag {
    String,
    StringList,
    Email,
    Int,
    IntList,
    Float,
    FloatList,
    Url,
}

impl SanitizeTag {
    pub const ALL: [SanitizeTag; 8] = [
        SanitizeTag::String,
        SanitizeTag::StringList,
        SanitizeTag::Email,
        SanitizeTag::Int,
        SanitizeTag::IntList,
        SanitizeTag::Float,
        SanitizeTag::FloatList,
        SanitizeTag::Url,
    ];

    /// The tag as written in rule strings.
    pub fn name(self) -> &'static str {
        match self {
            SanitizeTag::String => "string",
            SanitizeTag::StringList => "string[]",
            SanitizeTag::Email => "email",
            SanitizeTag::Int => "int",
            SanitizeTag::IntList => "int[]",
            SanitizeTag::Float => "float",
            SanitizeTag::FloatList => "float[]",
            SanitizeTag::Url => "url",
        }
    }

    pub fn expects_list(self) -> bool {
        matches!(
            self,
            SanitizeTag::StringList | SanitizeTag::IntList | SanitizeTag::FloatList
        )
    }

    /// Cleans a single piece of text according to this tag.
    pub fn clean_text(self, text: &str) -> String {
        match self {
            SanitizeTag::String | SanitizeTag::StringList => strip_markup(text),
            SanitizeTag::Email => keep_class(text, CharClass::Email),
            SanitizeTag::Int | SanitizeTag::IntList => keep_class(text, CharClass::NumberInt),
            SanitizeTag::Float | SanitizeTag::FloatList => {
                keep_class(text, CharClass::NumberFloat)
            }
            SanitizeTag::Url => keep_class(text, CharClass::Url),
        }
    }

    /// Applies the tag to a whole field value.
    ///
    /// Returns `None` when the value has the wrong shape for the tag: a list
    /// under a scalar tag or a scalar under a `[]` tag. `Null` is returned
    /// unchanged.
    pub fn apply(self, value: &FieldValue) -> Option<FieldValue> {
        match (value, self.expects_list()) {
            (FieldValue::Null, _) => Some(FieldValue::Null),
            (FieldValue::List(items), true) => Some(self.clean_list(items)),
            (FieldValue::List(_), false) | (_, true) => None,
            (scalar, false) => Some(self.clean_scalar(scalar)),
        }
    }

    /// Applies the tag to a value of any shape: lists are cleaned element by
    /// element, nested lists included. Used when one tag covers every field.
    pub fn apply_each(self, value: &FieldValue) -> FieldValue {
        match value {
            FieldValue::Null => FieldValue::Null,
            FieldValue::List(items) => self.clean_list(items),
            scalar => self.clean_scalar(scalar),
        }
    }

    fn clean_list(self, items: &[FieldValue]) -> FieldValue {
        FieldValue::List(
            items
                .iter()
                .map(|item| match item {
                    FieldValue::Null => FieldValue::Null,
                    FieldValue::List(nested) => self.clean_list(nested),
                    scalar => self.clean_scalar(scalar),
                })
                .collect(),
        )
    }

    fn clean_scalar(self, scalar: &FieldValue) -> FieldValue {
        match scalar.as_text() {
            Some(text) => FieldValue::Text(self.clean_text(&text)),
            None => FieldValue::Null,
        }
    }
}

impl fmt::Display for SanitizeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SanitizeTag {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SanitizeTag::ALL
            .into_iter()
            .find(|tag| tag.name() == wanted)
            .ok_or_else(|| FilterError::UnknownSanitizeTag(wanted.to_string()))
    }
}

impl TryFrom<String> for SanitizeTag {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SanitizeTag> for String {
    fn from(tag: SanitizeTag) -> Self {
        tag.name().to_string()
    }
}
