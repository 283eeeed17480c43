//! Declarative per-field validation rules.
//!
//! Rules run in declaration order and the first failure wins, so each field
//! shows a single message. An empty optional field skips every rule.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use super::field::FieldDescriptor;
use crate::state::form::{FieldErrors, FormState};
use crate::util::datetime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    Url,
    MinLength(usize),
    Positive,
    DateTime,
}

impl Rule {
    /// Check a non-empty value. `Required` always passes here.
    fn check(self, field: &FieldDescriptor, text: &str) -> Result<(), String> {
        let ok = match self {
            Self::Required => true,
            Self::Email => is_email(text),
            Self::Url => is_url(text),
            Self::MinLength(min) => text.chars().count() >= min,
            Self::Positive => text.trim().parse::<f64>().is_ok_and(|n| n > 0.0),
            Self::DateTime => datetime::parse(text).is_some(),
        };
        if ok { Ok(()) } else { Err(self.message(field)) }
    }

    pub fn message(self, field: &FieldDescriptor) -> String {
        match self {
            Self::Required => format!("{} is required", field.label),
            Self::Email => "Enter a valid email address".to_owned(),
            Self::Url => "Must be a valid URL".to_owned(),
            Self::MinLength(min) => format!("{} must be at least {min} characters", field.label),
            Self::Positive => format!("{} must be a positive number", field.label),
            Self::DateTime => "Invalid date format".to_owned(),
        }
    }
}

/// Validate every field, returning only the failing ones.
pub fn validate(form: &FormState, fields: &[FieldDescriptor]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in fields {
        if let Err(message) = validate_field(form, field) {
            errors.insert(field.name.clone(), message);
        }
    }
    errors
}

fn validate_field(form: &FormState, field: &FieldDescriptor) -> Result<(), String> {
    if !form.has_value(&field.name) {
        return if field.is_required() { Err(Rule::Required.message(field)) } else { Ok(()) };
    }
    // Multi-valued and file fields only carry the required rule.
    if field.tag.is_multi_valued() || !form.pending_for(&field.name).is_empty() {
        return Ok(());
    }
    let text = form.text(&field.name);
    field.rules.iter().try_for_each(|rule| rule.check(field, &text))
}

fn is_email(text: &str) -> bool {
    let text = text.trim();
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

fn is_url(text: &str) -> bool {
    let text = text.trim();
    let rest = text
        .strip_prefix("https://")
        .or_else(|| text.strip_prefix("http://"));
    rest.is_some_and(|rest| {
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        !host.is_empty() && !rest.chars().any(char::is_whitespace)
    })
}
