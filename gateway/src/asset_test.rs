use super::*;

#[test]
fn extracts_public_id_with_folder() {
    let url = "https://res.cloudinary.com/demo/image/upload/v1712345678/workouts/squat_ab12.jpg";
    assert_eq!(public_id_from_url(url).unwrap(), "workouts/squat_ab12");
}

#[test]
fn extracts_public_id_without_folder() {
    let url = "https://res.cloudinary.com/demo/image/upload/v1/plank.png";
    assert_eq!(public_id_from_url(url).unwrap(), "plank");
}

#[test]
fn rejects_urls_without_version_segment() {
    let url = "https://res.cloudinary.com/demo/image/upload/plank.png";
    assert!(matches!(public_id_from_url(url), Err(GatewayError::Upload(_))));
}

#[test]
fn rejects_urls_without_extension() {
    let url = "https://res.cloudinary.com/demo/image/upload/v12/plank";
    assert!(public_id_from_url(url).is_err());
}

#[test]
fn rejects_foreign_urls() {
    assert!(public_id_from_url("https://example.com/a.png").is_err());
}

#[test]
fn single_upload_serializes_as_url() {
    let one = Uploaded::from_urls(vec!["https://cdn/a.png".to_owned()]);
    assert_eq!(serde_json::to_value(&one).unwrap(), serde_json::json!({"url": "https://cdn/a.png"}));
    assert_eq!(one.into_urls(), vec!["https://cdn/a.png".to_owned()]);
}

#[test]
fn multiple_uploads_serialize_as_urls() {
    let many = Uploaded::from_urls(vec!["a".to_owned(), "b".to_owned()]);
    let json = serde_json::to_value(&many).unwrap();
    assert_eq!(json, serde_json::json!({"urls": ["a", "b"]}));
    let back: Uploaded = serde_json::from_value(json).unwrap();
    assert_eq!(back.into_urls(), vec!["a".to_owned(), "b".to_owned()]);
}
