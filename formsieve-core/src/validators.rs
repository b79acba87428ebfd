// File: formsieve-core/src/validators.rs
//! Built-in rule checkers.
//!
//! Every checker has the same shape: it receives the [`CheckContext`] for one
//! field plus the rule's parameters and returns `true` when the field passes.
//! A missing or null field passes every rule except `required` and `secure`,
//! so rules compose: `"min:3"` alone means "at least 3 characters if given".
//!
//! License: MIT OR APACHE 2.0

use chrono::{Datelike, NaiveDate};
use formsieve_charset::{keep_class, trim_blank, CharClass};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::phone;
use crate::rules::{CheckContext, RuleParam};
use crate::value::FieldValue;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("email pattern is valid")
});

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$",
    )
    .expect("numeric pattern is valid")
});

const MAX_EMAIL_LENGTH: usize = 320;
const MAX_EMAIL_LOCAL_LENGTH: usize = 64;

/// Character count of a scalar value. `None` for lists.
fn char_length(value: &FieldValue) -> Option<usize> {
    value.as_text().map(|text| text.chars().count())
}

fn int_param(params: &[RuleParam], index: usize) -> Option<i64> {
    params.get(index).and_then(RuleParam::as_int)
}

/// Present and not blank. Lists must be non-empty with no blank element.
pub fn is_required(ctx: &CheckContext<'_>, _params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return false;
    };

    match value {
        FieldValue::List(items) => {
            !items.is_empty()
                && items.iter().all(|item| match item {
                    FieldValue::List(nested) => !nested.is_empty(),
                    scalar => scalar
                        .as_text()
                        .is_some_and(|text| !trim_blank(&text).is_empty()),
                })
        }
        FieldValue::Text(text) => !text.is_empty(),
        // `false` reads as empty text, as it does after sanitizing
        FieldValue::Bool(flag) => *flag,
        _ => true,
    }
}

/// Absent, empty, or a syntactically valid email address.
pub fn is_email(ctx: &CheckContext<'_>, _params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    let Some(text) = value.as_text() else {
        return false;
    };
    if text.is_empty() {
        return true;
    }

    let Some((local, _)) = text.rsplit_once('@') else {
        return false;
    };
    text.len() <= MAX_EMAIL_LENGTH
        && local.len() <= MAX_EMAIL_LOCAL_LENGTH
        && EMAIL_REGEX.is_match(&text)
}

pub fn is_min(ctx: &CheckContext<'_>, params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    match (char_length(value), int_param(params, 0)) {
        (Some(len), Some(min)) => len as i64 >= min,
        _ => false,
    }
}

pub fn is_max(ctx: &CheckContext<'_>, params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    match (char_length(value), int_param(params, 0)) {
        (Some(len), Some(max)) => len as i64 <= max,
        _ => false,
    }
}

/// Inclusive length range.
pub fn is_between(ctx: &CheckContext<'_>, params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    match (char_length(value), int_param(params, 0), int_param(params, 1)) {
        (Some(len), Some(min), Some(max)) => (min..=max).contains(&(len as i64)),
        _ => false,
    }
}

/// Strict equality with another field. Both absent passes, one absent fails.
pub fn is_same(ctx: &CheckContext<'_>, params: &[RuleParam]) -> bool {
    let Some(other) = params.first() else {
        return false;
    };
    match (ctx.value(), ctx.value_of(&other.as_str())) {
        (Some(mine), Some(theirs)) => mine == theirs,
        (None, None) => true,
        _ => false,
    }
}

/// Non-empty and ASCII letters or digits only.
pub fn is_alphanumeric(ctx: &CheckContext<'_>, _params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    value
        .as_text()
        .is_some_and(|text| !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Password strength. Unlike the other rules an absent field fails.
pub fn is_secure(ctx: &CheckContext<'_>, _params: &[RuleParam]) -> bool {
    let Some(text) = ctx.value().and_then(FieldValue::as_text) else {
        return false;
    };

    let len = text.chars().count();
    (8..=64).contains(&len)
        && text.chars().any(|c| c.is_ascii_lowercase())
        && text.chars().any(|c| c.is_ascii_uppercase())
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
}

/// Integers, floats, and text that reads as a decimal number.
pub fn is_number(ctx: &CheckContext<'_>, _params: &[RuleParam]) -> bool {
    match ctx.value() {
        None => true,
        Some(FieldValue::Int(_)) => true,
        Some(FieldValue::Float(f)) => f.is_finite(),
        Some(FieldValue::Text(text)) => NUMERIC_REGEX.is_match(text),
        Some(_) => false,
    }
}

/// Something digit-like survives integer normalization.
pub fn is_phone(ctx: &CheckContext<'_>, _params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    value
        .as_text()
        .is_some_and(|text| !keep_class(&text, CharClass::NumberInt).is_empty())
}

/// Something survives URL normalization.
pub fn is_url(ctx: &CheckContext<'_>, _params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    value
        .as_text()
        .is_some_and(|text| !keep_class(&text, CharClass::Url).is_empty())
}

/// A valid phone number for the region named by the first parameter.
pub fn is_iso(ctx: &CheckContext<'_>, params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    let (Some(text), Some(region)) = (value.as_text(), params.first()) else {
        return false;
    };
    phone::is_valid_for_region(&text, &region.as_str())
}

/// Whole years from the field's `YYYY-MM-DD` date to today reach the minimum.
pub fn is_min_age(ctx: &CheckContext<'_>, params: &[RuleParam]) -> bool {
    let Some(value) = ctx.value() else {
        return true;
    };
    let Some(min_age) = int_param(params, 0) else {
        return false;
    };
    let Some(born) = value
        .as_text()
        .and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok())
    else {
        return false;
    };

    full_years_between(born, ctx.today()) >= min_age
}

fn full_years_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut years = i64::from(to.year()) - i64::from(from.year());
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Input;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn data(value: serde_json::Value) -> Input {
        serde_json::from_value(value).unwrap()
    }

    fn check(
        checker: fn(&CheckContext<'_>, &[RuleParam]) -> bool,
        input: &Input,
        field: &str,
        params: &[&str],
    ) -> bool {
        let params: Vec<RuleParam> = params.iter().map(|p| RuleParam::parse(p)).collect();
        checker(&CheckContext::new(input, field, today()), &params)
    }

    #[test]
    fn test_required() {
        assert!(!check(is_required, &data(json!({})), "name", &[]));
        assert!(!check(is_required, &data(json!({"name": null})), "name", &[]));
        assert!(!check(is_required, &data(json!({"name": ""})), "name", &[]));
        assert!(check(is_required, &data(json!({"name": " "})), "name", &[]));
        assert!(check(is_required, &data(json!({"name": "Ada"})), "name", &[]));
        assert!(check(is_required, &data(json!({"n": 0})), "n", &[]));
    }

    #[test]
    fn test_required_treats_false_as_empty() {
        assert!(!check(is_required, &data(json!({"a": false})), "a", &[]));
        assert!(check(is_required, &data(json!({"a": true})), "a", &[]));
    }

    #[test]
    fn test_required_lists() {
        assert!(!check(is_required, &data(json!({"t": []})), "t", &[]));
        assert!(!check(is_required, &data(json!({"t": ["a", "  "]})), "t", &[]));
        assert!(check(is_required, &data(json!({"t": ["a", "b"]})), "t", &[]));
    }

    #[test]
    fn test_email() {
        assert!(check(is_email, &data(json!({})), "e", &[]));
        assert!(check(is_email, &data(json!({"e": ""})), "e", &[]));
        assert!(check(is_email, &data(json!({"e": "ada@example.com"})), "e", &[]));
        assert!(check(is_email, &data(json!({"e": "first.last+tag@mail.example.org"})), "e", &[]));
        assert!(!check(is_email, &data(json!({"e": "ada@"})), "e", &[]));
        assert!(!check(is_email, &data(json!({"e": "ada.example.com"})), "e", &[]));
        assert!(!check(is_email, &data(json!({"e": "a..b@example.com"})), "e", &[]));
        assert!(!check(is_email, &data(json!({"e": "ada@localhost"})), "e", &[]));
    }

    #[test]
    fn test_min_max_between_count_characters() {
        let input = data(json!({"name": "ab", "long": "abc", "uni": "żółw"}));
        assert!(!check(is_min, &input, "name", &["3"]));
        assert!(check(is_min, &input, "long", &["3"]));
        assert!(check(is_max, &input, "uni", &["4"]));
        assert!(!check(is_max, &input, "uni", &["3"]));
        assert!(check(is_between, &input, "uni", &["4", "4"]));
        assert!(!check(is_between, &input, "name", &["3", "5"]));
    }

    #[test]
    fn test_length_rules_pass_when_absent() {
        let input = data(json!({}));
        assert!(check(is_min, &input, "nickname", &["3"]));
        assert!(check(is_max, &input, "nickname", &["3"]));
        assert!(check(is_between, &input, "nickname", &["3", "5"]));
    }

    #[test]
    fn test_length_rules_fail_on_lists_and_bad_params() {
        let input = data(json!({"tags": ["a", "b", "c"], "name": "abc"}));
        assert!(!check(is_min, &input, "tags", &["1"]));
        assert!(!check(is_min, &input, "name", &["three"]));
    }

    #[test]
    fn test_same() {
        let input = data(json!({"password": "x", "confirm": "x", "other": "y", "num": 1, "text": "1"}));
        assert!(check(is_same, &input, "confirm", &["password"]));
        assert!(!check(is_same, &input, "other", &["password"]));
        assert!(!check(is_same, &input, "num", &["text"]));
        assert!(!check(is_same, &input, "confirm", &["missing"]));
        assert!(check(is_same, &data(json!({})), "confirm", &["password"]));
    }

    #[test]
    fn test_alphanumeric() {
        let input = data(json!({"a": "abc123", "b": "abc 123", "c": "", "d": "zażółć"}));
        assert!(check(is_alphanumeric, &input, "a", &[]));
        assert!(!check(is_alphanumeric, &input, "b", &[]));
        assert!(!check(is_alphanumeric, &input, "c", &[]));
        assert!(!check(is_alphanumeric, &input, "d", &[]));
        assert!(check(is_alphanumeric, &input, "missing", &[]));
    }

    #[test]
    fn test_secure() {
        let input = data(json!({
            "good": "Str0ng!pass",
            "short": "S0!a",
            "no_upper": "str0ng!pass",
            "no_digit": "Strong!pass",
            "no_special": "Str0ngpass",
            "underscore_only": "Str0ng_pass",
        }));
        assert!(check(is_secure, &input, "good", &[]));
        assert!(!check(is_secure, &input, "short", &[]));
        assert!(!check(is_secure, &input, "no_upper", &[]));
        assert!(!check(is_secure, &input, "no_digit", &[]));
        assert!(!check(is_secure, &input, "no_special", &[]));
        assert!(!check(is_secure, &input, "underscore_only", &[]));
        assert!(!check(is_secure, &input, "missing", &[]));

        let too_long = format!("Aa1!{}", "x".repeat(61));
        assert!(!check(is_secure, &data(json!({"p": too_long})), "p", &[]));
    }

    #[test]
    fn test_number() {
        let input = data(json!({
            "int": 4, "float": 1.5, "text": "-1.5e3", "padded": " 42 ",
            "dot": ".5", "word": "4x", "hex": "0x1A", "bool": true, "empty": "",
        }));
        for field in ["int", "float", "text", "padded", "dot", "missing"] {
            assert!(check(is_number, &input, field, &[]), "{} should be numeric", field);
        }
        for field in ["word", "hex", "bool", "empty"] {
            assert!(!check(is_number, &input, field, &[]), "{} should not be numeric", field);
        }
    }

    #[test]
    fn test_phone_and_url_normalization() {
        let input = data(json!({"p": "+1 (555) 010-9999", "bad": "call me", "u": "https://x.io", "blank": "ü"}));
        assert!(check(is_phone, &input, "p", &[]));
        assert!(!check(is_phone, &input, "bad", &[]));
        assert!(check(is_url, &input, "u", &[]));
        assert!(!check(is_url, &input, "blank", &[]));
        assert!(check(is_url, &input, "missing", &[]));
    }

    #[test]
    fn test_iso() {
        let input = data(json!({"us": "+1 650-253-0000", "short": "12", "word": "not a number"}));
        assert!(check(is_iso, &input, "us", &["US"]));
        assert!(!check(is_iso, &input, "short", &["US"]));
        assert!(!check(is_iso, &input, "word", &["US"]));
        assert!(!check(is_iso, &input, "us", &["XX"]));
        assert!(check(is_iso, &input, "missing", &["US"]));
    }

    #[test]
    fn test_min_age() {
        let input = data(json!({
            "adult": "2006-06-15",
            "almost": "2006-06-16",
            "garbage": "yesterday",
        }));
        assert!(check(is_min_age, &input, "adult", &["18"]));
        assert!(!check(is_min_age, &input, "almost", &["18"]));
        assert!(!check(is_min_age, &input, "garbage", &["18"]));
        assert!(check(is_min_age, &input, "missing", &["18"]));
    }

    #[test]
    fn test_full_years_between() {
        let from = NaiveDate::from_ymd_opt(2000, 2, 29).unwrap();
        assert_eq!(full_years_between(from, NaiveDate::from_ymd_opt(2018, 2, 28).unwrap()), 17);
        assert_eq!(full_years_between(from, NaiveDate::from_ymd_opt(2018, 3, 1).unwrap()), 18);
    }
}
