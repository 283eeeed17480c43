//! Field values, validation errors, and submit status of one entity form.
//!
//! DESIGN
//! ======
//! Values are kept as JSON so a record fetched from the backend can seed the
//! form without per-entity types. Controls write strings (or string arrays for
//! multi-value fields); coercion to numbers and booleans happens once, when the
//! payload is built. Browser `File` handles for pending uploads live outside
//! this struct because they are not `Send`; only their names are tracked here
//! so validation and previews can see them.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::net::types::value_text;

/// Field name -> first failing rule message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub values: Map<String, Value>,
    pub errors: FieldErrors,
    pub submitting: bool,
    pub pending_files: BTreeMap<String, Vec<String>>,
}

impl FormState {
    pub fn new(values: Map<String, Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Scalar text of a field as a control displays it.
    pub fn text(&self, name: &str) -> String {
        self.values.get(name).map(value_text).unwrap_or_default()
    }

    /// Set a field and clear its stale error.
    pub fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
        self.errors.remove(name);
    }

    /// Selected option values of a multi-value field.
    ///
    /// A scalar value counts as a one-element selection.
    pub fn selected(&self, name: &str) -> Vec<String> {
        match self.values.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .map(value_text)
                .filter(|v| !v.is_empty())
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                let text = value_text(other);
                if text.is_empty() { Vec::new() } else { vec![text] }
            }
        }
    }

    pub fn is_selected(&self, name: &str, option: &str) -> bool {
        self.selected(name).iter().any(|v| v == option)
    }

    /// Replace the whole selection of a multi-value field.
    pub fn set_selected(&mut self, name: &str, values: Vec<String>) {
        let items = values.into_iter().map(Value::String).collect();
        self.set_value(name, Value::Array(items));
    }

    /// Checkbox-group toggle: add `option` when checked, remove it otherwise.
    ///
    /// Order of first selection is kept and duplicates are never added.
    pub fn toggle_option(&mut self, name: &str, option: &str, checked: bool) {
        let mut current = self.selected(name);
        let present = current.iter().any(|v| v == option);
        if checked && !present {
            current.push(option.to_owned());
        } else if !checked && present {
            current.retain(|v| v != option);
        } else {
            return;
        }
        self.set_selected(name, current);
    }

    /// Record files chosen for an image field (names only).
    ///
    /// Ignored while a submit is in flight; the upload step already read them.
    pub fn attach_files(&mut self, name: &str, file_names: Vec<String>) {
        if self.submitting {
            return;
        }
        if file_names.is_empty() {
            self.pending_files.remove(name);
        } else {
            self.pending_files.insert(name.to_owned(), file_names);
        }
        self.errors.remove(name);
    }

    pub fn pending_for(&self, name: &str) -> &[String] {
        self.pending_files.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether a field holds something a `required` rule accepts.
    pub fn has_value(&self, name: &str) -> bool {
        if !self.pending_for(name).is_empty() {
            return true;
        }
        match self.values.get(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }

    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Whether a control must refuse input: read-only fields always, every
    /// field while a submit is in flight.
    pub fn locks_input(&self, read_only: bool) -> bool {
        read_only || self.submitting
    }

    /// Enter the submitting phase. `false` if a submit is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}
