use super::*;
use serde_json::json;

fn record(value: Value) -> Record {
    serde_json::from_value(value).expect("record")
}

#[test]
fn id_prefers_underscore_id() {
    let r = record(json!({"_id": "abc", "id": "other"}));
    assert_eq!(r.id().as_deref(), Some("abc"));
}

#[test]
fn id_accepts_oid_object_and_numeric_id() {
    assert_eq!(record(json!({"_id": {"$oid": "6650"}})).id().as_deref(), Some("6650"));
    assert_eq!(record(json!({"id": 42})).id().as_deref(), Some("42"));
}

#[test]
fn id_missing_or_empty_is_none() {
    assert_eq!(record(json!({"name": "x"})).id(), None);
    assert_eq!(record(json!({"_id": ""})).id(), None);
    assert_eq!(record(json!({"name": "x"})).record_id(), "");
}

#[test]
fn text_renders_scalars_and_lists() {
    let r = record(json!({
        "name": "Squat",
        "duration": 30,
        "status": true,
        "equipment": ["Barbell", "Rack"],
        "missing": null
    }));
    assert_eq!(r.text("name"), "Squat");
    assert_eq!(r.text("duration"), "30");
    assert_eq!(r.text("status"), "true");
    assert_eq!(r.text("equipment"), "Barbell, Rack");
    assert_eq!(r.text("missing"), "");
    assert_eq!(r.text("absent"), "");
}

#[test]
fn admin_user_defaults_optional_fields() {
    let user: AdminUser =
        serde_json::from_value(json!({"id": "u1", "name": "Ana", "email": "ana@fit.io"})).expect("user");
    assert_eq!(user.role, "");
    assert_eq!(user.image, None);
}
