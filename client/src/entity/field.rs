//! Form field descriptors and the closed mapping from field type to control.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every create/update page renders its inputs from a list of
//! `FieldDescriptor`s. The renderer never branches on entity type, only on
//! `Control`, which is derived from the descriptor's `FieldTag`.
//!
//! DESIGN
//! ======
//! `FieldTag` is a closed enum and `Control::for_tag` is an exhaustive match,
//! so a new tag fails to compile until it has a control. Tags that arrive as
//! text (see `FieldDescriptor::parse`) are rejected with
//! `FieldConfigError::UnknownTag` instead of rendering nothing.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::str::FromStr;

use gateway::EntityKind;
use serde::{Deserialize, Serialize};

use super::validate::Rule;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldConfigError {
    #[error("unknown field type `{tag}` for field `{field}`")]
    UnknownTag { field: String, tag: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldTag {
    Text,
    Email,
    Password,
    Number,
    Select,
    TextArea,
    RichText,
    SingleSelect,
    MultiSelect,
    Image,
    Checkbox,
    DateTime,
}

impl FieldTag {
    pub const ALL: [Self; 12] = [
        Self::Text,
        Self::Email,
        Self::Password,
        Self::Number,
        Self::Select,
        Self::TextArea,
        Self::RichText,
        Self::SingleSelect,
        Self::MultiSelect,
        Self::Image,
        Self::Checkbox,
        Self::DateTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Select => "select",
            Self::TextArea => "textarea",
            Self::RichText => "rich-text",
            Self::SingleSelect => "single-select",
            Self::MultiSelect => "multi-select",
            Self::Image => "image",
            Self::Checkbox => "checkbox",
            Self::DateTime => "datetime",
        }
    }

    /// Tags whose value is picked from `options`.
    pub fn uses_options(self) -> bool {
        matches!(self, Self::Select | Self::SingleSelect | Self::MultiSelect | Self::Checkbox)
    }

    /// Tags whose value is a list of option values.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::MultiSelect | Self::Checkbox)
    }
}

impl FromStr for FieldTag {
    type Err = FieldConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| FieldConfigError::UnknownTag {
                field: String::new(),
                tag: s.to_owned(),
            })
    }
}

/// The concrete input widget a field renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Native `<input>` with the given `type` attribute.
    Input { input_type: &'static str },
    TextArea,
    /// Markdown editor with live preview; submitted as HTML.
    RichText,
    /// Radio group, exactly one option.
    SingleChoice,
    /// Single-value `<select>`.
    Dropdown,
    /// Multi-value `<select multiple>`.
    MultiDropdown,
    /// One checkbox per option; toggling adds or removes the value.
    CheckboxGroup,
    /// Drop zone plus file picker; uploads on submit.
    ImageDrop,
    /// `datetime-local` input stored as `YYYY-MM-DD HH:MM:SS`.
    DateTime,
}

impl Control {
    pub fn for_tag(tag: FieldTag) -> Self {
        match tag {
            FieldTag::Text => Self::Input { input_type: "text" },
            FieldTag::Email => Self::Input { input_type: "email" },
            FieldTag::Password => Self::Input { input_type: "password" },
            FieldTag::Number => Self::Input { input_type: "number" },
            FieldTag::TextArea => Self::TextArea,
            FieldTag::RichText => Self::RichText,
            FieldTag::SingleSelect => Self::SingleChoice,
            FieldTag::Select => Self::Dropdown,
            FieldTag::MultiSelect => Self::MultiDropdown,
            FieldTag::Checkbox => Self::CheckboxGroup,
            FieldTag::Image => Self::ImageDrop,
            FieldTag::DateTime => Self::DateTime,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Which record attribute becomes an option's submitted value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKey {
    Name,
    Id,
}

/// Options loaded from another entity's records at page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceSource {
    pub kind: EntityKind,
    pub value_key: ValueKey,
}

/// How a control's text is converted when the payload is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Coerce {
    #[default]
    None,
    Number,
    Bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub tag: FieldTag,
    pub options: Vec<SelectOption>,
    pub reference: Option<ReferenceSource>,
    pub placeholder: Option<String>,
    pub rules: Vec<Rule>,
    pub read_only: bool,
    pub coerce: Coerce,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, tag: FieldTag) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            tag,
            options: Vec::new(),
            reference: None,
            placeholder: None,
            rules: Vec::new(),
            read_only: false,
            coerce: if tag == FieldTag::Number { Coerce::Number } else { Coerce::None },
        }
    }

    /// Build a descriptor from a textual field type.
    pub fn parse(name: &str, label: &str, tag: &str) -> Result<Self, FieldConfigError> {
        let tag = tag.parse::<FieldTag>().map_err(|_| FieldConfigError::UnknownTag {
            field: name.to_owned(),
            tag: tag.to_owned(),
        })?;
        Ok(Self::new(name, label, tag))
    }

    #[must_use]
    pub fn options<I, L, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: Into<String>,
    {
        self.options = options.into_iter().map(|(l, v)| SelectOption::new(l, v)).collect();
        self
    }

    /// Options from `kind`'s records, resolved before the form renders.
    #[must_use]
    pub fn reference(mut self, kind: EntityKind, value_key: ValueKey) -> Self {
        self.reference = Some(ReferenceSource { kind, value_key });
        self
    }

    /// `true`/`false` radio pair stored as a JSON boolean.
    #[must_use]
    pub fn boolean(mut self, yes: &str, no: &str) -> Self {
        self.options = vec![SelectOption::new(yes, "true"), SelectOption::new(no, "false")];
        self.coerce = Coerce::Bool;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn control(&self) -> Control {
        Control::for_tag(self.tag)
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    /// Placeholder shown when none is configured.
    pub fn placeholder_text(&self) -> String {
        self.placeholder.clone().unwrap_or_else(|| match self.control() {
            Control::Dropdown | Control::MultiDropdown => "Select an Option".to_owned(),
            _ => format!("Enter {}", self.label.to_lowercase()),
        })
    }
}
