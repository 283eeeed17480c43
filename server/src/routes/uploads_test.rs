use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, header};
use serde_json::json;

use super::*;
use crate::routes::test_support::{call, request};
use crate::state::test_helpers::{MockAssets, MockBackend, signed_in, test_app_state};

const BOUNDARY: &str = "XBOUNDARYX";

fn with_assets(assets: Arc<MockAssets>) -> AppState {
    let mut state = test_app_state(MockBackend::new(vec![]));
    state.assets = Some(assets as Arc<dyn AssetHost>);
    state
}

/// Multipart body with one part per `(field, file_name)`.
fn multipart_request(uri: &str, session: &str, parts: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (field, file_name) in parts {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\npng-bytes\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, format!("{}={session}", crate::routes::auth::COOKIE_NAME))
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// sanitize_folder
// =============================================================================

#[test]
fn folder_keeps_plain_segments() {
    assert_eq!(sanitize_folder("news"), Some("news".into()));
    assert_eq!(sanitize_folder("/live-match/covers/"), Some("live-match/covers".into()));
    assert_eq!(sanitize_folder(" user_images "), Some("user_images".into()));
}

#[test]
fn folder_rejects_traversal_and_odd_characters() {
    assert_eq!(sanitize_folder(""), None);
    assert_eq!(sanitize_folder("../etc"), None);
    assert_eq!(sanitize_folder("a//b"), None);
    assert_eq!(sanitize_folder("has space"), None);
}

// =============================================================================
// upload
// =============================================================================

#[tokio::test]
async fn upload_without_asset_host_is_503() {
    let state = test_app_state(MockBackend::new(vec![]));
    let id = signed_in(&state).await;
    let req = multipart_request("/api/admin/uploads", &id, &[("file", "a.png")]);
    let (status, _, json) = call(state, req).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["message"], "Image uploads are not configured");
}

#[tokio::test]
async fn single_upload_returns_one_url() {
    let assets = Arc::new(MockAssets::default());
    let state = with_assets(assets.clone());
    let id = signed_in(&state).await;
    let req = multipart_request("/api/admin/uploads?folder=news", &id, &[("file", "cover.png")]);
    let (status, _, json) = call(state, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["url"], "https://res.cloudinary.com/demo/image/upload/v1/news/cover.png");
    assert_eq!(assets.uploaded.lock().unwrap().clone(), vec![("cover.png".to_owned(), "news".to_owned())]);
}

#[tokio::test]
async fn multiple_uploads_use_default_folder() {
    let assets = Arc::new(MockAssets::default());
    let state = with_assets(assets.clone());
    let id = signed_in(&state).await;
    let parts = [("file", "a.png"), ("caption", "ignored.txt"), ("file", "b.png")];
    let (status, _, json) = call(state, multipart_request("/api/admin/uploads", &id, &parts)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["urls"].as_array().map(Vec::len), Some(2));
    assert!(assets.uploaded.lock().unwrap().iter().all(|(_, folder)| folder == "uploads"));
}

#[tokio::test]
async fn upload_without_file_parts_is_400() {
    let state = with_assets(Arc::new(MockAssets::default()));
    let id = signed_in(&state).await;
    let req = multipart_request("/api/admin/uploads", &id, &[("caption", "x.txt")]);
    let (status, _, json) = call(state, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "No file provided");
}

#[tokio::test]
async fn upload_rejects_invalid_folder() {
    let state = with_assets(Arc::new(MockAssets::default()));
    let id = signed_in(&state).await;
    let req = multipart_request("/api/admin/uploads?folder=..", &id, &[("file", "a.png")]);
    let (status, _, _) = call(state, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// delete
// =============================================================================

#[tokio::test]
async fn delete_destroys_public_id() {
    let assets = Arc::new(MockAssets::default());
    let state = with_assets(assets.clone());
    let id = signed_in(&state).await;
    let body = json!({ "url": "https://res.cloudinary.com/demo/image/upload/v1712/news/cover.png" });
    let (status, _, _) = call(state, request("DELETE", "/api/admin/uploads", Some(&id), Some(body))).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(assets.destroyed.lock().unwrap().clone(), vec!["news/cover".to_owned()]);
}

#[tokio::test]
async fn delete_rejects_foreign_url() {
    let assets = Arc::new(MockAssets::default());
    let state = with_assets(assets.clone());
    let id = signed_in(&state).await;
    let body = json!({ "url": "https://example.com/cover.png" });
    let (status, _, _) = call(state, request("DELETE", "/api/admin/uploads", Some(&id), Some(body))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(assets.destroyed.lock().unwrap().is_empty());
}
