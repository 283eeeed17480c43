//! Table column descriptors for entity list pages.

#[cfg(test)]
#[path = "column_test.rs"]
mod column_test;

use serde_json::Value;

use crate::net::types::Record;
use crate::util::datetime;

/// How a record field is turned into cell content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    /// Thumbnail from an image URL.
    Image,
    /// Truthy/falsy status rendered with two labels.
    Status { on: &'static str, off: &'static str },
    /// Stored value -> display label; unknown values pass through.
    Mapped(&'static [(&'static str, &'static str)]),
    DateTime,
    /// Text cut to at most this many characters with an ellipsis.
    Truncate(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: &'static str,
    pub header: &'static str,
    pub format: CellFormat,
}

impl ColumnDescriptor {
    pub const fn new(key: &'static str, header: &'static str, format: CellFormat) -> Self {
        Self { key, header, format }
    }

    pub const fn text(key: &'static str, header: &'static str) -> Self {
        Self::new(key, header, CellFormat::Text)
    }

    /// Cell text (for `Image`, the URL).
    pub fn cell_text(&self, record: &Record) -> String {
        let raw = record.text(self.key);
        match self.format {
            CellFormat::Text | CellFormat::Image => raw,
            CellFormat::Status { on, off } => {
                let label = if record.get(self.key).is_some_and(is_truthy) { on } else { off };
                label.to_owned()
            }
            CellFormat::Mapped(labels) => labels
                .iter()
                .find(|(value, _)| *value == raw)
                .map_or(raw.clone(), |(_, label)| (*label).to_owned()),
            CellFormat::DateTime => datetime::display(&raw),
            CellFormat::Truncate(max) => truncate(&raw, max),
        }
    }
}

/// Backend status flags arrive as bools, 0/1, or words.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "active" | "yes"),
        _ => false,
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
