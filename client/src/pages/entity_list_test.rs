use super::*;
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    serde_json::from_value(value).expect("record")
}

#[test]
fn image_urls_collects_every_image_field() {
    let schema = schema_for(EntityKind::LiveMatch);
    let row = record(json!({
        "_id": "m1",
        "team_one_image": "https://res.cloudinary.com/demo/image/upload/v1/a.png",
        "team_two_image": "https://res.cloudinary.com/demo/image/upload/v1/b.png",
    }));
    assert_eq!(image_urls(&schema, &row).len(), 2);
}

#[test]
fn image_urls_skips_blank_values() {
    let schema = schema_for(EntityKind::Category);
    let row = record(json!({ "_id": "c1", "image": "" }));
    assert!(image_urls(&schema, &row).is_empty());
}

#[test]
fn image_urls_empty_for_schemas_without_images() {
    let schema = schema_for(EntityKind::Subscription);
    let row = record(json!({ "_id": "s1", "image": "https://example.com/x.png" }));
    assert!(image_urls(&schema, &row).is_empty());
}
