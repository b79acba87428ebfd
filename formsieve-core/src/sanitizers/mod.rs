//! Field sanitization for formsieve.
//!
//! A sanitizer maps each field to a [`SanitizeTag`] and reduces the raw value
//! to the characters that tag allows, optionally trimming the result. This is
//! the stage that runs before validation: validators only ever see cleaned
//! data when driven through [`crate::filter`].
//!
//! The character-class primitives themselves live in `formsieve-charset`.

pub mod sanitizer;
pub mod tags;

pub use sanitizer::{sanitize, trim_value, Sanitizer};
pub use tags::SanitizeTag;
