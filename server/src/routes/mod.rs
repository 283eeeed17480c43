//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API (auth, entity proxy, uploads) and stitches
//! it with Leptos SSR rendering under a single Axum router. Static WASM/CSS
//! bundles are served from the Leptos site root under `/pkg`.

pub mod auth;
pub mod entities;
pub mod error;
pub mod uploads;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes used by the hydrated client.
pub(crate) fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/admin/uploads",
            post(uploads::upload)
                .delete(uploads::delete)
                .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES)),
        )
        .route("/api/admin/{entity}", get(entities::list).post(entities::create))
        .route("/api/admin/{entity}/options", get(entities::options))
        .route("/api/admin/{entity}/reorder", post(entities::reorder))
        .route(
            "/api/admin/{entity}/{id}",
            get(entities::find).patch(entities::update).delete(entities::remove),
        )
        .route("/api/public/news", get(entities::public_news))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes + Leptos SSR + static assets, gzip-compressed on request.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    let site = leptos_router
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new());

    Ok(api_routes(state).merge(site))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// TEST SUPPORT
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    /// Request with an optional session cookie and optional JSON body.
    pub fn request(method: &str, uri: &str, session: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = session {
            builder = builder.header(header::COOKIE, format!("{}={id}", auth::COOKIE_NAME));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    /// Drive the API router once. Non-JSON bodies come back as a string,
    /// empty ones as `Null`.
    pub async fn call(state: AppState, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = api_routes(state).oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, headers, body)
    }

    /// Whether the response clears the session cookie.
    pub fn clears_session_cookie(headers: &HeaderMap) -> bool {
        headers.get_all(header::SET_COOKIE).iter().any(|v| {
            v.to_str()
                .is_ok_and(|c| c.starts_with(&format!("{}=", auth::COOKIE_NAME)) && c.contains("Max-Age=0"))
        })
    }
}
