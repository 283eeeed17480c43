use gateway::{Body, Method};
use serde_json::json;

use super::*;
use crate::routes::test_support::{call, clears_session_cookie, request};
use crate::state::test_helpers::{MockBackend, signed_in, test_app_state};

fn list_body() -> Value {
    json!({ "data": { "docs": [{ "_id": "c1", "name": "Strength" }], "totalDocs": 1, "totalPages": 1 } })
}

// =============================================================================
// slugs and sessions
// =============================================================================

#[tokio::test]
async fn unknown_entity_is_404() {
    let state = test_app_state(MockBackend::new(vec![]));
    let id = signed_in(&state).await;
    let (status, _, json) = call(state, request("GET", "/api/admin/widgets", Some(&id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Unknown entity: widgets");
}

#[tokio::test]
async fn admin_routes_require_session() {
    let backend = MockBackend::new(vec![]);
    let state = test_app_state(backend.clone());
    let (status, _, _) = call(state, request("GET", "/api/admin/category", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(backend.calls().is_empty());
}

// =============================================================================
// list / find
// =============================================================================

#[tokio::test]
async fn list_forwards_paging_and_bearer_token() {
    let backend = MockBackend::new(vec![Ok(list_body())]);
    let state = test_app_state(backend.clone());
    let id = signed_in(&state).await;
    let uri = "/api/admin/category?page=2&limit=20&search=str";
    let (status, _, json) = call(state, request("GET", uri, Some(&id), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalDocs"], 1);

    let calls = backend.calls();
    let (sent, token) = &calls[0];
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.path, "/v1/category/all");
    assert_eq!(
        sent.query,
        vec![
            ("page".to_owned(), "2".to_owned()),
            ("limit".to_owned(), "20".to_owned()),
            ("search".to_owned(), "str".to_owned()),
        ]
    );
    assert_eq!(token.as_deref(), Some("access-token"));
}

#[tokio::test]
async fn malformed_paging_falls_back_to_defaults() {
    let backend = MockBackend::new(vec![Ok(list_body())]);
    let state = test_app_state(backend.clone());
    let id = signed_in(&state).await;
    let (status, _, _) = call(state, request("GET", "/api/admin/news?page=abc&limit=0", Some(&id), None)).await;

    assert_eq!(status, StatusCode::OK);
    let sent = &backend.calls()[0].0;
    assert_eq!(sent.path, "/admin/news");
    assert_eq!(sent.query[0], ("page".to_owned(), "1".to_owned()));
    assert_eq!(sent.query[1], ("limit".to_owned(), "10".to_owned()));
}

#[tokio::test]
async fn failed_envelope_status_is_relayed() {
    let backend = MockBackend::new(vec![Ok(json!({ "status": false, "msg": "Name already exists" }))]);
    let state = test_app_state(backend);
    let id = signed_in(&state).await;
    let body = json!({ "name": "Strength" });
    let (status, _, json) = call(state, request("POST", "/api/admin/category", Some(&id), Some(body))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "Name already exists");
}

#[tokio::test]
async fn backend_401_ends_session() {
    let backend = MockBackend::new(vec![Err(GatewayError::Unauthenticated { path: "/v1/workout/find/w1".into() })]);
    let state = test_app_state(backend);
    let id = signed_in(&state).await;
    let (status, headers, _) = call(state.clone(), request("GET", "/api/admin/workout/w1", Some(&id), None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(clears_session_cookie(&headers));
    assert!(state.sessions.get(&id).await.is_none());
}

#[tokio::test]
async fn transport_failure_is_bad_gateway() {
    let backend = MockBackend::new(vec![Err(GatewayError::Transport("timed out".into()))]);
    let state = test_app_state(backend);
    let id = signed_in(&state).await;
    let (status, _, _) = call(state.clone(), request("GET", "/api/admin/category/options", Some(&id), None)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(state.sessions.get(&id).await.is_some());
}

// =============================================================================
// mutations
// =============================================================================

#[tokio::test]
async fn legacy_update_carries_id_in_body() {
    let backend = MockBackend::new(vec![Ok(json!({ "status": 200, "data": {} }))]);
    let state = test_app_state(backend.clone());
    let id = signed_in(&state).await;
    let body = json!({ "title": "Final" });
    let (status, _, _) = call(state, request("PATCH", "/api/admin/live-match/m1", Some(&id), Some(body))).await;

    assert_eq!(status, StatusCode::OK);
    let sent = &backend.calls()[0].0;
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.path, "/admin/live-match/update");
    assert_eq!(sent.body, Body::Json(json!({ "title": "Final", "id": "m1" })));
}

#[tokio::test]
async fn notification_update_is_not_allowed() {
    let backend = MockBackend::new(vec![]);
    let state = test_app_state(backend.clone());
    let id = signed_in(&state).await;
    let body = json!({ "title": "Hi" });
    let (status, _, json) = call(state, request("PATCH", "/api/admin/notification/n1", Some(&id), Some(body))).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["message"], "Notification records cannot be updated");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn delete_targets_versioned_path() {
    let backend = MockBackend::new(vec![]);
    let state = test_app_state(backend.clone());
    let id = signed_in(&state).await;
    let (status, _, _) = call(state, request("DELETE", "/api/admin/equipment/e9", Some(&id), None)).await;

    assert_eq!(status, StatusCode::OK);
    let sent = &backend.calls()[0].0;
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.path, "/v1/equipment/delete/e9");
}

#[tokio::test]
async fn reorder_sends_one_based_positions() {
    let backend = MockBackend::new(vec![]);
    let state = test_app_state(backend.clone());
    let id = signed_in(&state).await;
    let body = json!({ "ids": ["b", "a"] });
    let (status, _, _) = call(state, request("POST", "/api/admin/live-match/reorder", Some(&id), Some(body))).await;

    assert_eq!(status, StatusCode::OK);
    let sent = &backend.calls()[0].0;
    assert_eq!(
        sent.body,
        Body::Json(json!({ "positions": [{ "id": "b", "position": 1 }, { "id": "a", "position": 2 }] }))
    );
}

#[tokio::test]
async fn reorder_on_second_page_offsets_positions() {
    let backend = MockBackend::new(vec![]);
    let state = test_app_state(backend.clone());
    let id = signed_in(&state).await;
    let body = json!({ "ids": ["m12", "m11"], "offset": 10 });
    let (status, _, _) = call(state, request("POST", "/api/admin/live-match/reorder", Some(&id), Some(body))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        backend.calls()[0].0.body,
        Body::Json(json!({ "positions": [{ "id": "m12", "position": 11 }, { "id": "m11", "position": 12 }] }))
    );
}

#[tokio::test]
async fn reorder_rejects_empty_and_unsortable() {
    let state = test_app_state(MockBackend::new(vec![]));
    let id = signed_in(&state).await;

    let empty = json!({ "ids": [] });
    let (status, _, _) = call(state.clone(), request("POST", "/api/admin/live-match/reorder", Some(&id), Some(empty))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let ids = json!({ "ids": ["x"] });
    let (status, _, _) = call(state, request("POST", "/api/admin/category/reorder", Some(&id), Some(ids))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// public
// =============================================================================

#[tokio::test]
async fn public_news_needs_no_session() {
    let backend = MockBackend::new(vec![Ok(list_body())]);
    let state = test_app_state(backend.clone());
    let (status, _, _) = call(state, request("GET", "/api/public/news", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    let (sent, token) = &backend.calls()[0];
    assert_eq!(sent.path, "/admin/news");
    assert!(sent.query.contains(&("limit".to_owned(), NEWS_FEED_SIZE.to_string())));
    assert!(token.is_none());
}

#[tokio::test]
async fn json_responses_are_gzipped_on_request() {
    let docs: Vec<Value> = (0..20).map(|i| json!({ "_id": format!("n{i}"), "title": "Morning mobility" })).collect();
    let backend = MockBackend::new(vec![Ok(json!({ "data": { "docs": docs, "totalDocs": 20, "totalPages": 2 } }))]);
    let mut req = request("GET", "/api/public/news", None, None);
    req.headers_mut()
        .insert(axum::http::header::ACCEPT_ENCODING, axum::http::HeaderValue::from_static("gzip"));
    let (status, headers, _) = call(test_app_state(backend), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(axum::http::header::CONTENT_ENCODING).map(|v| v.as_bytes()), Some(&b"gzip"[..]));
}

#[tokio::test]
async fn healthz_is_ok() {
    let state = test_app_state(MockBackend::new(vec![]));
    let (status, _, _) = call(state, request("GET", "/healthz", None, None)).await;
    assert_eq!(status, StatusCode::OK);
}
