use super::*;
use serde_json::json;

#[test]
fn list_envelope_reads_camel_case_totals() {
    let raw = json!({
        "data": {
            "docs": [{"_id": "a"}, {"_id": "b"}],
            "totalDocs": 42,
            "totalPages": 5
        }
    });
    let env: ListEnvelope<Value> = serde_json::from_value(raw).unwrap();
    assert_eq!(env.data.docs.len(), 2);
    assert_eq!(env.data.total_docs, 42);
    assert_eq!(env.data.total_pages, 5);
}

#[test]
fn list_envelope_tolerates_missing_data() {
    let env: ListEnvelope<Value> = serde_json::from_value(json!({})).unwrap();
    assert!(env.data.docs.is_empty());
    assert_eq!(env.data.total_pages, 0);
}

#[test]
fn item_envelope_success_accepts_bool_and_2xx() {
    let ok: ItemEnvelope<Value> = serde_json::from_value(json!({"status": true, "data": {}})).unwrap();
    assert!(ok.is_success());

    let ok: ItemEnvelope<Value> = serde_json::from_value(json!({"status": 201})).unwrap();
    assert!(ok.is_success());

    let bad: ItemEnvelope<Value> = serde_json::from_value(json!({"status": 400, "msg": "dup"})).unwrap();
    assert!(!bad.is_success());
    assert_eq!(bad.msg.as_deref(), Some("dup"));
}

#[test]
fn item_envelope_accepts_message_alias() {
    let env: ItemEnvelope<Value> = serde_json::from_value(json!({"status": false, "message": "nope"})).unwrap();
    assert_eq!(env.msg.as_deref(), Some("nope"));
    assert!(!env.is_success());
}

#[test]
fn list_from_body_accepts_bare_array() {
    let data: ListData<Value> = ListData::from_body(json!({"data": [{"_id": "a"}, {"_id": "b"}]})).unwrap();
    assert_eq!(data.docs.len(), 2);
    assert_eq!(data.total_docs, 2);
    assert_eq!(data.total_pages, 1);

    let empty: ListData<Value> = ListData::from_body(json!({"data": []})).unwrap();
    assert_eq!(empty.total_pages, 0);
}

#[test]
fn list_from_body_accepts_paged_shape() {
    let data: ListData<Value> =
        ListData::from_body(json!({"data": {"docs": [{"_id": "a"}], "totalDocs": 11, "totalPages": 2}})).unwrap();
    assert_eq!(data.total_docs, 11);
    assert_eq!(data.total_pages, 2);
}

#[test]
fn list_from_body_rejects_wrong_shape() {
    let err = ListData::<Value>::from_body(json!({"data": {"docs": 5}})).unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[test]
fn ensure_success_passes_plain_and_successful_bodies() {
    assert!(ensure_success(&json!({"data": {}})).is_ok());
    assert!(ensure_success(&json!({"status": true, "msg": "created"})).is_ok());
    assert!(ensure_success(&json!({"status": 200})).is_ok());
}

#[test]
fn ensure_success_maps_failed_status_to_error() {
    assert_eq!(
        ensure_success(&json!({"status": false, "msg": "Name already taken"})),
        Err(GatewayError::Status { status: 422, message: "Name already taken".to_owned() })
    );
    assert_eq!(
        ensure_success(&json!({"status": 409, "message": "duplicate"})),
        Err(GatewayError::Status { status: 409, message: "duplicate".to_owned() })
    );
    assert_eq!(
        ensure_success(&json!({"status": false})),
        Err(GatewayError::Status { status: 422, message: "Unknown error".to_owned() })
    );
}

#[test]
fn truthy_status_flags_count_as_success() {
    for status in [json!(1), json!(200), json!("ok"), json!("201")] {
        let env: ItemEnvelope<Value> = serde_json::from_value(json!({ "status": status })).unwrap();
        assert!(env.is_success(), "{status} should succeed");
    }
    for status in [json!(0), json!(""), json!(null), json!(404), json!("500")] {
        let env: ItemEnvelope<Value> = serde_json::from_value(json!({ "status": status })).unwrap();
        assert!(!env.is_success(), "{status} should fail");
    }
    assert!(ensure_success(&json!({"status": 1, "data": {}})).is_ok());
}

#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Named {
    name: String,
}

#[test]
fn list_body_decodes_records_without_default() {
    let paged = json!({ "data": { "docs": [{ "name": "Yoga" }], "totalDocs": 1, "totalPages": 1 } });
    let data = ListData::<Named>::from_body(paged).unwrap();
    assert_eq!(data.docs, vec![Named { name: "Yoga".into() }]);

    let bare = json!({ "data": [{ "name": "Pilates" }, { "name": "Boxing" }] });
    let data = ListData::<Named>::from_body(bare).unwrap();
    assert_eq!(data.total_docs, 2);
    assert_eq!(data.total_pages, 1);
}
