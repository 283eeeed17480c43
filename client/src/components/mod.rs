//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the admin chrome and the generic table/form surfaces
//! while reading shared auth and toast state from Leptos context providers.

pub mod admin_shell;
pub mod data_table;
pub mod entity_form;
pub mod form_field;
pub mod row_actions;
pub mod toast_stack;
