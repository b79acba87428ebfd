//! Error message overrides and template formatting.
//!
//! Templates use a small printf subset: `%s`, `%d`, positional `%N$s` /
//! `%N$d` (1-based) and `%%`. The first argument is always the field name,
//! followed by the rule's parameters. Anything else after a `%` is copied
//! through literally, and a missing argument formats as nothing.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::rules::RuleRegistry;

/// Caller-supplied message templates.
///
/// Rule-level overrides replace a rule's default message for every field.
/// Field-level overrides apply to one field and one rule and beat both.
///
/// Deserializes from a single mixed map, where string values are rule-level
/// and map values are field-level:
///
/// ```yaml
/// min: "%s is too short"
/// name:
///   required: "Name needed"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, MessageEntry>",
    into = "BTreeMap<String, MessageEntry>"
)]
pub struct Messages {
    rules: BTreeMap<String, String>,
    fields: BTreeMap<String, BTreeMap<String, String>>,
}

/// One entry of the serialized override map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageEntry {
    Rule(String),
    Field(BTreeMap<String, String>),
}

impl From<BTreeMap<String, MessageEntry>> for Messages {
    fn from(entries: BTreeMap<String, MessageEntry>) -> Self {
        let mut messages = Messages::default();
        for (key, entry) in entries {
            match entry {
                MessageEntry::Rule(template) => {
                    messages.rules.insert(key, template);
                }
                MessageEntry::Field(per_rule) => {
                    messages.fields.insert(key, per_rule);
                }
            }
        }
        messages
    }
}

impl From<Messages> for BTreeMap<String, MessageEntry> {
    fn from(messages: Messages) -> Self {
        let mut entries: BTreeMap<String, MessageEntry> = messages
            .rules
            .into_iter()
            .map(|(rule, template)| (rule, MessageEntry::Rule(template)))
            .collect();
        for (field, per_rule) in messages.fields {
            entries.insert(field, MessageEntry::Field(per_rule));
        }
        entries
    }
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the default message of `rule` for all fields.
    pub fn with_rule(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.rules.insert(rule.into(), template.into());
        self
    }

    /// Overrides the message of `rule` for `field` only.
    pub fn with_field(
        mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(rule.into(), template.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.fields.is_empty()
    }

    pub fn rule_overrides(&self) -> &BTreeMap<String, String> {
        &self.rules
    }

    pub fn field_overrides(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.fields
    }

    pub fn field_override(&self, field: &str, rule: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|per_rule| per_rule.get(rule))
            .map(String::as_str)
    }

    /// Rule names referenced by any override, field-level ones included.
    pub fn referenced_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .keys()
            .chain(self.fields.values().flat_map(BTreeMap::keys))
            .map(String::as_str)
    }
}

/// Registry defaults merged with rule-level overrides, built once per call.
#[derive(Debug, Clone)]
pub struct MessageTable<'a> {
    templates: HashMap<&'a str, &'a str>,
    messages: &'a Messages,
}

impl<'a> MessageTable<'a> {
    pub fn merge(registry: &'a RuleRegistry, messages: &'a Messages) -> Self {
        let mut templates: HashMap<&'a str, &'a str> = registry
            .default_messages()
            .iter()
            .map(|(rule, template)| (rule.as_str(), template.as_str()))
            .collect();
        templates.extend(
            messages
                .rules
                .iter()
                .map(|(rule, template)| (rule.as_str(), template.as_str())),
        );
        Self { templates, messages }
    }

    /// The template for `rule` on `field`: field override, else merged default.
    pub fn template_for(&self, field: &str, rule: &str) -> Option<&'a str> {
        self.messages
            .field_override(field, rule)
            .or_else(|| self.templates.get(rule).copied())
    }
}

/// Formats `template` with `args` using the printf subset described above.
pub fn format_template(template: &str, args: &[String]) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut next_arg = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if chars[i] != '%' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        if chars.get(i + 1) == Some(&'%') {
            out.push('%');
            i += 2;
            continue;
        }

        let mut spec_at = i + 1;
        while spec_at < chars.len() && chars[spec_at].is_ascii_digit() {
            spec_at += 1;
        }
        let position = if spec_at > i + 1 && chars.get(spec_at) == Some(&'$') {
            let digits: String = chars[i + 1..spec_at].iter().collect();
            spec_at += 1;
            Some(digits.parse::<usize>().unwrap_or(0))
        } else {
            spec_at = i + 1;
            None
        };

        match chars.get(spec_at) {
            Some(&spec @ ('s' | 'd')) => {
                let arg = match position {
                    Some(n) => n.checked_sub(1).and_then(|idx| args.get(idx)),
                    None => {
                        next_arg += 1;
                        args.get(next_arg - 1)
                    }
                };
                if let Some(arg) = arg {
                    if spec == 'd' {
                        out.push_str(&leading_integer(arg).to_string());
                    } else {
                        out.push_str(arg);
                    }
                }
                i = spec_at + 1;
            }
            _ => {
                out.push('%');
                i += 1;
            }
        }
    }

    out
}

/// Integer value of the leading numeric part of `text`, `0` when there is none.
fn leading_integer(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let value = digits
        .chars()
        .take_while(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10))
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d)));
    if negative {
        -value
    } else {
        value
    }
}
