//! Descriptor-driven entity schemas: form fields, table columns, and payloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! Eleven backend entities share one list page, one form page, and one data
//! table. Everything entity-specific lives in an `EntitySchema` from
//! `catalog::schema_for`; pages only interpret schemas.
//!
//! DESIGN
//! ======
//! - Reference options (a workout's category, equipment, ...) are resolved
//!   into concrete `SelectOption`s before a form renders, so the form never
//!   appears with half-loaded choices.
//! - `build_payload` is the single place where control text becomes typed
//!   JSON: numbers, booleans, uploaded URLs, and rich text as HTML.

pub mod catalog;
pub mod column;
pub mod field;
pub mod validate;


use std::collections::{BTreeMap, HashMap};

use gateway::EntityKind;
use serde_json::{Map, Number, Value};

use self::column::ColumnDescriptor;
use self::field::{Coerce, Control, FieldDescriptor, SelectOption, ValueKey};
use crate::net::types::{Record, value_text};
use crate::util::markdown;

/// What a form page does on submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
    /// Create a new record prefilled from an existing one.
    Resend,
}

impl FormMode {
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Resend => "Resend",
        }
    }

    pub fn loads_record(self) -> bool {
        !matches!(self, Self::Create)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub fields: Vec<FieldDescriptor>,
    pub columns: Vec<ColumnDescriptor>,
    pub search_placeholder: &'static str,
    pub defaults: Vec<(&'static str, Value)>,
}

impl EntitySchema {
    /// Entities whose records feed this schema's option lists, deduplicated.
    pub fn reference_kinds(&self) -> Vec<EntityKind> {
        let mut kinds = Vec::new();
        for field in &self.fields {
            if let Some(source) = field.reference {
                if !kinds.contains(&source.kind) {
                    kinds.push(source.kind);
                }
            }
        }
        kinds
    }

    /// Fields with reference options filled in from loaded records.
    pub fn resolve_fields(&self, references: &ReferenceOptions) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .cloned()
            .map(|mut field| {
                if let Some(source) = field.reference {
                    field.options = references.options(source.kind, source.value_key);
                }
                field
            })
            .collect()
    }

    /// Starting form values: schema defaults overlaid by the record's fields.
    pub fn initial_values(&self, record: Option<&Record>) -> Map<String, Value> {
        let mut values: Map<String, Value> = self
            .defaults
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect();
        let Some(record) = record else {
            return values;
        };
        for field in &self.fields {
            let Some(value) = record.get(&field.name) else {
                continue;
            };
            let value = if field.tag.is_multi_valued() {
                option_values(value)
            } else {
                populated_scalar(value)
            };
            values.insert(field.name.clone(), value);
        }
        values
    }

    /// Folder uploaded images are stored under.
    pub fn upload_folder(&self) -> &'static str {
        self.kind.slug()
    }
}

/// Loaded reference records keyed by entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceOptions(HashMap<EntityKind, Vec<Record>>);

impl ReferenceOptions {
    pub fn insert(&mut self, kind: EntityKind, records: Vec<Record>) {
        self.0.insert(kind, records);
    }

    /// Options labelled by `name`, valued by `name` or the record id.
    pub fn options(&self, kind: EntityKind, value_key: ValueKey) -> Vec<SelectOption> {
        self.0
            .get(&kind)
            .map(|records| {
                records
                    .iter()
                    .filter_map(|record| {
                        let label = record.text("name");
                        let value = match value_key {
                            ValueKey::Name => Some(label.clone()),
                            ValueKey::Id => record.id(),
                        }?;
                        (!label.is_empty() && !value.is_empty()).then(|| SelectOption::new(label, value))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl FromIterator<(EntityKind, Vec<Record>)> for ReferenceOptions {
    fn from_iter<I: IntoIterator<Item = (EntityKind, Vec<Record>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build the submit payload from form values.
///
/// `uploaded` holds hosted URLs for image fields whose files were uploaded in
/// this submit; they replace the field's previous value. Read-only fields,
/// blank passwords, blank images, and unparseable numbers are omitted.
pub fn build_payload(
    values: &Map<String, Value>,
    fields: &[FieldDescriptor],
    uploaded: &BTreeMap<String, Vec<String>>,
) -> Map<String, Value> {
    let mut payload = Map::new();
    for field in fields.iter().filter(|f| !f.read_only) {
        if let Some(url) = uploaded.get(&field.name).and_then(|urls| urls.first()) {
            payload.insert(field.name.clone(), Value::String(url.clone()));
            continue;
        }
        let raw = values.get(&field.name).cloned().unwrap_or(Value::Null);
        if let Some(value) = payload_value(field, raw) {
            payload.insert(field.name.clone(), value);
        }
    }
    payload
}

fn payload_value(field: &FieldDescriptor, raw: Value) -> Option<Value> {
    if field.tag.is_multi_valued() {
        return Some(option_values(&raw));
    }
    let text = value_text(&raw);
    match (field.control(), field.coerce) {
        (Control::ImageDrop | Control::Input { input_type: "password" }, _) if text.trim().is_empty() => None,
        (_, Coerce::Number) => parse_number(&text).map(Value::Number),
        (_, Coerce::Bool) => match raw {
            Value::Bool(b) => Some(Value::Bool(b)),
            _ => Some(Value::Bool(text == "true")),
        },
        (Control::RichText, _) => Some(Value::String(markdown::to_html(&text))),
        _ => Some(Value::String(text)),
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Multi-value fields may come back populated (`[{_id, name}]`); keep names.
fn option_values(value: &Value) -> Value {
    let items = match value {
        Value::Array(items) => items.iter().map(|item| unpopulate(item, "name")).collect(),
        Value::Null => Vec::new(),
        other => vec![unpopulate(other, "name")],
    };
    Value::Array(items)
}

/// Single references come back populated too; keep the id.
fn populated_scalar(value: &Value) -> Value {
    unpopulate(value, "_id")
}

fn unpopulate(value: &Value, key: &str) -> Value {
    match value {
        Value::Object(obj) => obj.get(key).cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}
