// formsieve-core/tests/filter_integration_tests.rs
use anyhow::Result;
use serde_json::json;
use std::collections::BTreeMap;
use test_log::test; // For integrating with `env_logger` in tests

use formsieve_core::{
    filter, sanitize, validate, FieldRules, FieldValue, FilterError, Input, InputFilter, Messages,
    Sanitizer, Validator,
};

fn input(value: serde_json::Value) -> Input {
    serde_json::from_value(value).unwrap()
}

fn rules(pairs: &[(&str, &str)]) -> FieldRules {
    pairs
        .iter()
        .map(|(f, r)| (f.to_string(), r.to_string()))
        .collect()
}

fn signup_rules() -> FieldRules {
    rules(&[
        ("name", "string|required|min:3|max:40"),
        ("email", "email|required|email"),
        ("password", "string|required|secure"),
        ("confirm", "string|required|same:password"),
        ("age", "int|number"),
    ])
}

#[test]
fn test_valid_signup_passes() -> Result<()> {
    let data = input(json!({
        "name": " <i>Ada</i> ",
        "email": "ada@example.com",
        "password": "Secr3t!pass",
        "confirm": "Secr3t!pass",
        "age": "30 years",
    }));

    let outcome = InputFilter::new().run(&data, &signup_rules(), &Messages::new())?;
    assert!(outcome.is_valid(), "unexpected errors: {:?}", outcome.errors);
    assert_eq!(outcome.data["name"], FieldValue::from("Ada"));
    assert_eq!(outcome.data["age"], FieldValue::from("30"));
    Ok(())
}

#[test]
fn test_one_message_per_failing_field() -> Result<()> {
    let data = input(json!({
        "name": "Al",
        "email": "not-an-email",
        "password": "weak",
        "confirm": "other",
    }));

    let errors = filter(&data, &signup_rules(), &Messages::new())?;
    assert_eq!(errors.len(), 4);
    assert_eq!(errors["name"], "The name must have at least 3 characters");
    assert_eq!(errors["email"], "The email is not a valid email address");
    assert!(errors["password"].starts_with("The password must have between 8 and 64 characters"));
    assert!(errors["password"].ends_with("(!@#$%^&*+_)"));
    assert_eq!(errors["confirm"], "The confirm must match with password");
    Ok(())
}

#[test]
fn test_missing_required_fields() -> Result<()> {
    let errors = filter(&input(json!({})), &signup_rules(), &Messages::new())?;

    assert_eq!(errors["name"], "Please enter the name");
    assert_eq!(errors["email"], "Please enter the email");
    // `age` has no `required`, so its absence is fine
    assert!(!errors.contains_key("age"));
    Ok(())
}

#[test]
fn test_field_override_beats_rule_override() -> Result<()> {
    let messages = Messages::new()
        .with_rule("required", "%s is mandatory")
        .with_field("email", "required", "Tell us where to write");

    let fields = rules(&[("name", "string|required"), ("email", "email|required")]);
    let errors = filter(&input(json!({})), &fields, &messages)?;

    assert_eq!(errors["name"], "name is mandatory");
    assert_eq!(errors["email"], "Tell us where to write");
    Ok(())
}

#[test]
fn test_unlisted_fields_pass_through() -> Result<()> {
    let data = input(json!({"name": "Ada", "token": " <raw> "}));
    let fields = rules(&[("name", "string|required")]);
    let outcome = InputFilter::new().run(&data, &fields, &Messages::new())?;

    // no tag, so markup survives; trimming still applies
    assert_eq!(outcome.data["token"], FieldValue::from("<raw>"));
    Ok(())
}

#[test]
fn test_list_fields_are_cleaned_elementwise() -> Result<()> {
    let data = input(json!({"ids": ["1", "x2", " 3 "], "tags": ["a", ""]}));
    let outcome = InputFilter::new().run(
        &data,
        &rules(&[("ids", "int[]|required"), ("tags", "string[]|required")]),
        &Messages::new(),
    )?;

    assert_eq!(outcome.data["ids"], FieldValue::from(vec!["1", "2", "3"]));
    assert!(!outcome.errors.contains_key("ids"));
    assert_eq!(outcome.errors["tags"], "Please enter the tags");
    Ok(())
}

#[test]
fn test_sanitize_without_tags_uses_default_for_every_field() -> Result<()> {
    let data = input(json!({"a": " <b>x</b> ", "b": "it's", "tags": [" <b>a</b> ", "b"]}));
    let cleaned = sanitize(&data, &BTreeMap::new())?;

    assert_eq!(cleaned["a"], FieldValue::from("x"));
    assert_eq!(cleaned["b"], FieldValue::from("it&#39;s"));
    assert_eq!(cleaned["tags"], FieldValue::from(vec!["a", "b"]));
    Ok(())
}

#[test]
fn test_sanitizer_without_trim_keeps_whitespace() -> Result<()> {
    let tags: BTreeMap<String, String> = [("a".to_string(), "string".to_string())]
        .into_iter()
        .collect();
    let cleaned = Sanitizer::new()
        .with_trim(false)
        .sanitize(&input(json!({"a": "  x  "})), &tags)?;

    assert_eq!(cleaned["a"], FieldValue::from("  x  "));
    Ok(())
}

#[test]
fn test_validate_alone_does_not_sanitize() -> Result<()> {
    let errors = validate(
        &input(json!({"code": "<b>ab</b>"})),
        &rules(&[("code", "alphanumeric")]),
        &Messages::new(),
    )?;

    assert_eq!(errors["code"], "The code should have only letters and numbers");
    Ok(())
}

#[test]
fn test_configuration_errors_are_reported_before_filtering() {
    let data = input(json!({"a": "x"}));
    let messages = Messages::new();

    let err = filter(&data, &rules(&[("a", "bogus|required")]), &messages).unwrap_err();
    assert!(matches!(err, FilterError::UnknownSanitizeTag(_)));

    let err = filter(&data, &rules(&[("a", "string|required|:2")]), &messages).unwrap_err();
    assert!(matches!(err, FilterError::MalformedRule(..)));

    let strict = InputFilter::with_parts(Sanitizer::new(), Validator::new().strict(true));
    let err = strict
        .filter(&data, &rules(&[("a", "string|nonsense")]), &messages)
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown validation rule 'nonsense' for field 'a'");

    let err = strict
        .filter(&data, &rules(&[("a", "string|between:1")]), &messages)
        .unwrap_err();
    assert_eq!(err.to_string(), "Rule 'between' on field 'a' expects 2 parameter(s) but got 1");
}

#[test]
fn test_odd_rule_strings_still_produce_an_error_bag() -> Result<()> {
    let data = input(json!({"a": "x", "b": "x", "c": false}));
    let fields = rules(&[
        ("a", "string|min"),
        ("b", "string|max-len:3|between:1"),
        ("c", "string|required"),
    ]);

    let errors = filter(&data, &fields, &Messages::new())?;
    assert_eq!(errors["a"], "The a must have at least  characters");
    assert_eq!(errors["b"], "The b must have between 1 and  characters");
    // `false` sanitizes to empty text
    assert_eq!(errors["c"], "Please enter the c");

    let unsanitized = validate(&data, &rules(&[("c", "required")]), &Messages::new())?;
    assert_eq!(unsanitized["c"], "Please enter the c");
    Ok(())
}

#[test]
fn test_filters_can_run_concurrently() {
    let fields = signup_rules();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let fields = &fields;
                scope.spawn(move || {
                    let name = "x".repeat(i);
                    let data = input(json!({"name": name, "email": "a@b.co"}));
                    filter(&data, fields, &Messages::new()).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let errors = handle.join().unwrap();
            // an empty name fails `required` and `min`; the later message wins
            if i < 3 {
                assert_eq!(errors["name"], "The name must have at least 3 characters");
            } else {
                assert!(!errors.contains_key("name"));
            }
            assert!(!errors.contains_key("email"));
        }
    });
}
