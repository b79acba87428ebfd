// formsieve-charset/src/markup/mod.rs
use alloc::string::String;

/// Strips markup tags and NUL bytes from `input` and encodes quotes.
///
/// A tag runs from `<` to the next `>` outside of a quoted attribute value.
/// A `<` followed by whitespace is plain text, while an unterminated tag
/// swallows the rest of the input. `'` and `"` in the surviving text become
/// `&#39;` and `&#34;`.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_tag = false;
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if in_tag {
            match (quote, c) {
                (Some(q), _) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"') | (None, '\'') => quote = Some(c),
                (None, '>') => in_tag = false,
                _ => {}
            }
            continue;
        }

        match c {
            '<' => match chars.peek() {
                Some(next) if next.is_whitespace() => out.push('<'),
                _ => in_tag = true,
            },
            '\0' => {}
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            other => out.push(other),
        }
    }

    out
}
