// formsieve-charset/src/trim/mod.rs

/// Characters removed from both ends of a value when trimming.
///
/// Narrower than Unicode whitespace: a non-breaking space is kept.
pub const TRIM_SET: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Trims [`TRIM_SET`] characters from both ends of `input`.
pub fn trim_blank(input: &str) -> &str {
    input.trim_matches(&TRIM_SET[..])
}
