//! Wire DTOs for the browser/server boundary.
//!
//! DESIGN
//! ======
//! Entity records stay schemaless (`serde_json::Map`) on the client: every
//! entity is rendered through the same descriptor-driven table and form, so
//! typed structs per entity would only duplicate the catalog. The admin
//! profile is the one typed payload because several components read it.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::table::TableRecord;

/// Authenticated administrator profile returned by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// One backend entity record as an untyped JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Backend identifier: `_id` (plain or `{"$oid": ..}`) or `id`.
    pub fn id(&self) -> Option<String> {
        let raw = self.0.get("_id").or_else(|| self.0.get("id"))?;
        match raw {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(obj) => obj.get("$oid").and_then(Value::as_str).map(str::to_owned),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Display text for a field; missing and `null` become empty.
    pub fn text(&self, key: &str) -> String {
        self.0.get(key).map(value_text).unwrap_or_default()
    }
}

impl TableRecord for Record {
    fn record_id(&self) -> String {
        self.id().unwrap_or_default()
    }
}

/// Render a scalar JSON value as the text a form control or cell shows.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}
