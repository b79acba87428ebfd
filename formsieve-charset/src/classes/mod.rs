// formsieve-charset/src/classes/mod.rs
use alloc::string::String;

/// Character classes a sanitizer can reduce a value to.
///
/// Each class is an allow-list: anything outside it is dropped, nothing is
/// escaped or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// ASCII letters, digits and ``!#$%&'*+-=?^_`{|}~@.[]``.
    Email,
    /// ASCII letters, digits and ``$-_.+!*'(),{}|\^~[]`<>#%";/?:@&=``.
    Url,
    /// Digits, `+` and `-`.
    NumberInt,
    /// Digits, `+`, `-` and `.`.
    NumberFloat,
}

const EMAIL_EXTRA: &[u8] = b"!#$%&'*+-=?^_`{|}~@.[]";
const URL_EXTRA: &[u8] = b"$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";

impl CharClass {
    /// Returns `true` when `c` survives filtering with this class.
    pub fn allows(self, c: char) -> bool {
        if !c.is_ascii() {
            return false;
        }
        let byte = c as u8;
        match self {
            CharClass::Email => byte.is_ascii_alphanumeric() || EMAIL_EXTRA.contains(&byte),
            CharClass::Url => byte.is_ascii_alphanumeric() || URL_EXTRA.contains(&byte),
            CharClass::NumberInt => byte.is_ascii_digit() || byte == b'+' || byte == b'-',
            CharClass::NumberFloat => {
                byte.is_ascii_digit() || byte == b'+' || byte == b'-' || byte == b'.'
            }
        }
    }
}

/// Drops every character of `input` that `class` does not allow.
pub fn keep_class(input: &str, class: CharClass) -> String {
    input.chars().filter(|&c| class.allows(c)).collect()
}
