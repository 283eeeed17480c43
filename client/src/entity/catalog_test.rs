use std::collections::HashSet;

use super::*;
use crate::entity::field::Control;

#[test]
fn every_kind_has_a_schema_for_itself() {
    for kind in EntityKind::ALL {
        let schema = schema_for(kind);
        assert_eq!(schema.kind, kind);
        assert!(!schema.fields.is_empty(), "{kind:?} has no fields");
        assert!(!schema.columns.is_empty(), "{kind:?} has no columns");
    }
}

#[test]
fn field_names_are_unique_per_schema() {
    for kind in EntityKind::ALL {
        let schema = schema_for(kind);
        let mut seen = HashSet::new();
        for field in &schema.fields {
            assert!(seen.insert(field.name.as_str()), "{kind:?} repeats {}", field.name);
        }
    }
}

#[test]
fn static_option_fields_have_options() {
    for kind in EntityKind::ALL {
        for field in schema_for(kind).fields {
            if field.tag.uses_options() && field.reference.is_none() {
                assert!(!field.options.is_empty(), "{kind:?}.{} has no options", field.name);
            }
        }
    }
}

#[test]
fn workout_references_four_lookups() {
    let kinds = schema_for(EntityKind::Workout).reference_kinds();
    assert_eq!(
        kinds,
        vec![
            EntityKind::Category,
            EntityKind::TrainingLevel,
            EntityKind::Equipment,
            EntityKind::TargetMuscle
        ]
    );
}

#[test]
fn workout_uses_every_choice_control() {
    let controls: Vec<Control> = schema_for(EntityKind::Workout).fields.iter().map(|f| f.control()).collect();
    for expected in [Control::Dropdown, Control::MultiDropdown, Control::CheckboxGroup, Control::SingleChoice] {
        assert!(controls.contains(&expected), "missing {expected:?}");
    }
}

#[test]
fn lookup_entities_default_to_active() {
    let schema = schema_for(EntityKind::Equipment);
    let values = schema.initial_values(None);
    assert_eq!(values.get("status"), Some(&json!(true)));
}

#[test]
fn news_body_is_rich_text() {
    let schema = schema_for(EntityKind::News);
    let body = schema.fields.iter().find(|f| f.name == "description").expect("description");
    assert_eq!(body.control(), Control::RichText);
}
