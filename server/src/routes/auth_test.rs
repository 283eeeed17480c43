use axum::http::header;
use gateway::GatewayError;
use serde_json::json;

use super::*;
use crate::routes::test_support::{call, clears_session_cookie, request};
use crate::state::test_helpers::{MockBackend, signed_in, test_app_state};

fn login_ok() -> serde_json::Value {
    json!({
        "status": 200,
        "data": {
            "_id": "admin-1",
            "name": "Ada Admin",
            "email": "ada@example.com",
            "role": "admin",
            "accessToken": "access-1",
            "refreshToken": "refresh-1"
        }
    })
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_and_lax() {
    let cookie = session_cookie("abc".into(), true);
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "abc");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.secure(), Some(true));
}

#[test]
fn cleared_cookie_expires_immediately() {
    let cookie = cleared_cookie(false);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

// =============================================================================
// login / me / logout
// =============================================================================

#[tokio::test]
async fn login_sets_cookie_and_returns_profile() {
    let state = test_app_state(MockBackend::new(vec![Ok(login_ok())]));
    let body = json!({ "email": "ada@example.com", "password": "secret1" });
    let (status, headers, json) = call(state.clone(), request("POST", "/api/auth/login", None, Some(body))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["id"], "admin-1");
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{COOKIE_NAME}=")));
    assert!(set_cookie.contains("HttpOnly"));
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn login_requires_both_fields() {
    let state = test_app_state(MockBackend::new(vec![]));
    let body = json!({ "email": " ", "password": "x" });
    let (status, _, json) = call(state, request("POST", "/api/auth/login", None, Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Email and password are required");
}

#[tokio::test]
async fn rejected_login_is_401_with_backend_message() {
    let backend = MockBackend::new(vec![Ok(json!({ "status": 401, "message": "Invalid password" }))]);
    let state = test_app_state(backend);
    let body = json!({ "email": "ada@example.com", "password": "wrong" });
    let (status, _, json) = call(state.clone(), request("POST", "/api/auth/login", None, Some(body))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid password");
    assert_eq!(state.sessions.len().await, 0);
}

#[tokio::test]
async fn backend_outage_during_login_is_bad_gateway() {
    let backend = MockBackend::new(vec![Err(GatewayError::Transport("connection refused".into()))]);
    let body = json!({ "email": "ada@example.com", "password": "secret1" });
    let (status, _, _) = call(test_app_state(backend), request("POST", "/api/auth/login", None, Some(body))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn me_requires_session_cookie() {
    let state = test_app_state(MockBackend::new(vec![]));
    let (status, _, json) = call(state, request("GET", "/api/auth/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Not authenticated");
}

#[tokio::test]
async fn me_with_unknown_session_clears_cookie() {
    let state = test_app_state(MockBackend::new(vec![]));
    let (status, headers, _) = call(state, request("GET", "/api/auth/me", Some("stale"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(clears_session_cookie(&headers));
}

#[tokio::test]
async fn me_returns_signed_in_profile() {
    let state = test_app_state(MockBackend::new(vec![]));
    let id = signed_in(&state).await;
    let (status, _, json) = call(state, request("GET", "/api/auth/me", Some(&id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Ada Admin");
}

#[tokio::test]
async fn logout_drops_session_and_clears_cookie() {
    let state = test_app_state(MockBackend::new(vec![]));
    let id = signed_in(&state).await;
    let (status, headers, _) = call(state.clone(), request("POST", "/api/auth/logout", Some(&id), None)).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(clears_session_cookie(&headers));
    assert!(state.sessions.get(&id).await.is_none());
}
