//! Declarative field validation.
//!
//! Input types expose their fields through [`Fields`] and declare a static rule list through
//! [`Validate`]. [`validate`] interprets the rules and collects one message per failing field.

use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;

pub const DEFAULT_MISMATCH_MESSAGE: &str = "Fields do not match";
pub const DEFAULT_EMAIL_MESSAGE: &str = "must be a well-formed email address";

/// Result of reading a named field off an input object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// The type has no field with this name.
    Unknown,
    Absent,
    Present(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn from_option(value: Option<&'a str>) -> Self {
        match value {
            Some(text) => FieldValue::Present(text),
            None => FieldValue::Absent,
        }
    }

    /// Blank-aware view of the value: `None` for absent or whitespace-only text.
    fn non_blank(self) -> Option<&'a str> {
        match self {
            FieldValue::Present(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Read access to the textual fields of an input object.
pub trait Fields {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// An input type with a fixed set of rules.
pub trait Validate: Fields {
    const RULES: &'static [Rule];

    fn validate(&self) -> Result<Violations, RuleError> {
        validate(self, Self::RULES)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
}

impl Format {
    fn matches(self, value: &str) -> bool {
        match self {
            Format::Email => is_email(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required {
        field: &'static str,
        message: &'static str,
    },
    Format {
        field: &'static str,
        format: Format,
        message: &'static str,
    },
    /// Fails on `target` unless both fields are blank or both hold the same text.
    FieldsMustMatch {
        source: &'static str,
        target: &'static str,
        message: &'static str,
    },
}

impl Rule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Rule::Required { field, message }
    }

    pub const fn email(field: &'static str) -> Self {
        Rule::Format {
            field,
            format: Format::Email,
            message: DEFAULT_EMAIL_MESSAGE,
        }
    }

    pub const fn fields_must_match(source: &'static str, target: &'static str) -> Self {
        Rule::FieldsMustMatch {
            source,
            target,
            message: DEFAULT_MISMATCH_MESSAGE,
        }
    }

    /// Same rule with a different violation message.
    pub const fn with_message(self, message: &'static str) -> Self {
        match self {
            Rule::Required { field, .. } => Rule::Required { field, message },
            Rule::Format { field, format, .. } => Rule::Format { field, format, message },
            Rule::FieldsMustMatch { source, target, .. } => Rule::FieldsMustMatch {
                source,
                target,
                message,
            },
        }
    }
}

/// A rule that cannot be evaluated against the object it was declared for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule references unknown field `{0}`")]
    UnknownField(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Field violations in discovery order, at most one entry per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Violations {
    entries: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation. A second violation on the same field replaces the message but keeps
    /// the field's original position.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|v| v.field == field) {
            Some(existing) => existing.message = message,
            None => self.entries.push(Violation { field, message }),
        }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut violations = Self::new();
        violations.add(field, message);
        violations
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.entries.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|v| v.field.as_str())
    }
}

impl Serialize for Violations {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for violation in self.iter() {
            map.serialize_entry(&violation.field, &violation.message)?;
        }
        map.end()
    }
}

fn read<'a, T: Fields + ?Sized>(object: &'a T, name: &str) -> Result<FieldValue<'a>, RuleError> {
    match object.field(name) {
        FieldValue::Unknown => Err(RuleError::UnknownField(name.to_string())),
        value => Ok(value),
    }
}

/// Evaluates `rules` against `object`.
///
/// Returns an empty [`Violations`] when every rule passes. A rule that names a field `object`
/// does not have aborts evaluation with [`RuleError::UnknownField`].
pub fn validate<T: Fields + ?Sized>(object: &T, rules: &[Rule]) -> Result<Violations, RuleError> {
    let mut violations = Violations::new();
    for rule in rules {
        match *rule {
            Rule::Required { field, message } => {
                if read(object, field)?.non_blank().is_none() {
                    violations.add(field, message);
                }
            }
            Rule::Format { field, format, message } => {
                if let Some(value) = read(object, field)?.non_blank() {
                    if !format.matches(value) {
                        violations.add(field, message);
                    }
                }
            }
            Rule::FieldsMustMatch { source, target, message } => {
                let source_value = read(object, source)?.non_blank();
                let target_value = read(object, target)?.non_blank();
                let matched = match (source_value, target_value) {
                    (None, None) => true,
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                };
                if !matched {
                    violations.add(target, message);
                }
            }
        }
    }
    Ok(violations)
}

const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

// Non-ASCII characters are accepted wherever letters are.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || !c.is_ascii()
}

fn is_domain_label(label: &str) -> bool {
    let len = label.chars().count();
    (1..=63).contains(&len)
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| is_word_char(c) || c == '-')
}

/// `[127.0.0.1]` or `[IPv6:::1]`.
fn is_ip_literal(domain: &str) -> bool {
    let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) else {
        return false;
    };
    match literal.strip_prefix("IPv6:") {
        Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
        None => literal.parse::<Ipv4Addr>().is_ok(),
    }
}

/// Shape check for `local@domain`. Domains may be a single label (`user@localhost`) or an IP
/// literal in brackets.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().count() > 64 || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if !local.chars().all(|c| is_word_char(c) || LOCAL_SPECIALS.contains(c)) {
        return false;
    }
    is_ip_literal(domain) || domain.split('.').all(is_domain_label)
}
