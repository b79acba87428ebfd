//! parser.rs - Turns rule strings into typed rule invocations.
//!
//! Grammar:
//!
//! ```text
//! chain  := token ( "|" token )*
//! token  := name [ ":" param ( "," param )* ]
//! name   := any text without "|" or ":", at least one character
//! ```
//!
//! Whitespace around tokens, names and parameters is ignored. Empty tokens
//! and empty parameters are skipped. Whether a name means anything is up to
//! the registry, not the parser.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::fmt;

use crate::errors::FilterError;

/// A single rule parameter, typed at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleParam {
    Integer(i64),
    Text(String),
}

impl RuleParam {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(n) => RuleParam::Integer(n),
            Err(_) => RuleParam::Text(raw.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            RuleParam::Integer(n) => Some(*n),
            RuleParam::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            RuleParam::Integer(n) => Cow::Owned(n.to_string()),
            RuleParam::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl fmt::Display for RuleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParam::Integer(n) => write!(f, "{}", n),
            RuleParam::Text(s) => f.write_str(s),
        }
    }
}

/// One parsed rule token: a rule name and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInvocation {
    pub name: String,
    pub params: Vec<RuleParam>,
}

impl RuleInvocation {
    /// Parses a single token such as `between:3,20`.
    ///
    /// `field` is only used for error reporting.
    pub fn parse(field: &str, token: &str) -> Result<Self, FilterError> {
        let token = token.trim();
        let (name, params) = match token.split_once(':') {
            Some((name, param_str)) => (
                name.trim(),
                param_str
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(RuleParam::parse)
                    .collect(),
            ),
            None => (token, Vec::new()),
        };

        if name.is_empty() {
            return Err(FilterError::MalformedRule(
                field.to_string(),
                token.to_string(),
                "missing rule name",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            params,
        })
    }

    /// Arguments for message formatting: the field name, then every parameter.
    pub fn message_args(&self, field: &str) -> Vec<String> {
        std::iter::once(field.to_string())
            .chain(self.params.iter().map(RuleParam::to_string))
            .collect()
    }
}

/// The parsed rule chain of one field, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleChain {
    pub field: String,
    pub invocations: Vec<RuleInvocation>,
}

impl RuleChain {
    pub fn parse(field: &str, chain: &str) -> Result<Self, FilterError> {
        let invocations = chain
            .split('|')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| RuleInvocation::parse(field, token))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            field: field.to_string(),
            invocations,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleInvocation> {
        self.invocations.iter()
    }
}
