//! REST API helpers for communicating with the dashboard server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, AppError>`. Non-2xx responses are classified
//! by `GatewayError::from_response`, so a 401 surfaces as
//! `AppError::Unauthenticated` and callers can end the session uniformly.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use gateway::{EntityKind, GatewayError, ListData, PageQuery};
use serde_json::{Map, Value};

use super::types::{AdminUser, Record};
use crate::entity::FormMode;
use crate::error::AppError;

#[cfg(any(test, feature = "hydrate"))]
const UPLOADS_PATH: &str = "/api/admin/uploads";

#[cfg(any(test, feature = "hydrate"))]
const NEWS_FEED_PATH: &str = "/api/public/news";

#[cfg(any(test, feature = "hydrate"))]
fn collection_path(kind: EntityKind) -> String {
    format!("/api/admin/{}", kind.slug())
}

#[cfg(any(test, feature = "hydrate"))]
fn item_path(kind: EntityKind, id: &str) -> String {
    format!("/api/admin/{}/{}", kind.slug(), urlencoding::encode(id))
}

#[cfg(any(test, feature = "hydrate"))]
fn options_path(kind: EntityKind) -> String {
    format!("/api/admin/{}/options", kind.slug())
}

#[cfg(any(test, feature = "hydrate"))]
fn reorder_path(kind: EntityKind) -> String {
    format!("/api/admin/{}/reorder", kind.slug())
}

#[cfg(any(test, feature = "hydrate"))]
fn list_url(kind: EntityKind, query: &PageQuery) -> String {
    let pairs: Vec<(String, String)> = query
        .api_params()
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();
    crate::util::query_string::href(&collection_path(kind), &crate::util::query_string::encode(&pairs))
}

#[cfg(any(test, feature = "hydrate"))]
fn upload_url(folder: &str) -> String {
    format!("{UPLOADS_PATH}?folder={}", urlencoding::encode(folder))
}

/// Method and path a form submit goes to.
#[cfg(any(test, feature = "hydrate"))]
fn save_target(kind: EntityKind, mode: FormMode, id: Option<&str>) -> (&'static str, String) {
    match (mode, id) {
        (FormMode::Update, Some(id)) => ("PATCH", item_path(kind, id)),
        _ => ("POST", collection_path(kind)),
    }
}

/// Record from a find response: `{ data: {...} }` or the bare object.
#[cfg(any(test, feature = "hydrate"))]
fn record_from_body(mut body: Value) -> Result<Record, GatewayError> {
    if body.get("data").is_some_and(Value::is_object) {
        let inner = body.get_mut("data").map(Value::take).unwrap_or_default();
        body = inner;
    }
    serde_json::from_value(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(not(feature = "hydrate"))]
fn server_unavailable() -> AppError {
    AppError::Gateway(GatewayError::Transport("not available on server".to_owned()))
}

#[cfg(feature = "hydrate")]
fn transport(err: impl std::fmt::Display) -> AppError {
    AppError::Gateway(GatewayError::Transport(err.to_string()))
}

/// Send a request and read its JSON body, classifying non-2xx responses.
#[cfg(feature = "hydrate")]
async fn send(method: &str, url: &str, body: Option<&Value>) -> Result<Value, AppError> {
    use gloo_net::http::{Method, RequestBuilder};

    let method = match method {
        "POST" => Method::POST,
        "PATCH" => Method::PATCH,
        "DELETE" => Method::DELETE,
        _ => Method::GET,
    };
    let builder = RequestBuilder::new(url).method(method);
    let request = match body {
        Some(body) => builder.json(body).map_err(transport)?,
        None => builder.build().map_err(transport)?,
    };
    let resp = request.send().await.map_err(transport)?;
    read_json(&resp, url).await
}

#[cfg(feature = "hydrate")]
async fn read_json(resp: &gloo_net::http::Response, url: &str) -> Result<Value, AppError> {
    let status = resp.status();
    let text = resp.text().await.map_err(transport)?;
    if !resp.ok() {
        return Err(GatewayError::from_response(status, url, &text).into());
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()).into())
}

/// Fetch the currently authenticated admin from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<AdminUser> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<AdminUser>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign in with admin credentials via `POST /api/auth/login`.
///
/// # Errors
///
/// Rejected credentials arrive as `AppError::Unauthenticated`; other failures
/// keep their gateway classification.
pub async fn login(email: &str, password: &str) -> Result<AdminUser, AppError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "password": password });
        let body = send("POST", "/api/auth/login", Some(&payload)).await?;
        serde_json::from_value(body).map_err(|e| GatewayError::Decode(e.to_string()).into())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(server_unavailable())
    }
}

/// End the session by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout").send().await;
    }
}

/// One page of an entity list.
///
/// # Errors
///
/// Transport, status, and decode failures.
pub async fn fetch_page(kind: EntityKind, query: &PageQuery) -> Result<ListData<Record>, AppError> {
    #[cfg(feature = "hydrate")]
    {
        let body = send("GET", &list_url(kind, query), None).await?;
        Ok(ListData::from_body(body)?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, query);
        Err(server_unavailable())
    }
}

/// Every record of `kind`, for building option lists.
///
/// # Errors
///
/// Transport, status, and decode failures.
pub async fn fetch_options(kind: EntityKind) -> Result<Vec<Record>, AppError> {
    #[cfg(feature = "hydrate")]
    {
        let body = send("GET", &options_path(kind), None).await?;
        Ok(ListData::<Record>::from_body(body)?.docs)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = kind;
        Err(server_unavailable())
    }
}

/// A single record by id.
///
/// # Errors
///
/// Transport, status, and decode failures.
pub async fn fetch_record(kind: EntityKind, id: &str) -> Result<Record, AppError> {
    #[cfg(feature = "hydrate")]
    {
        let body = send("GET", &item_path(kind, id), None).await?;
        Ok(record_from_body(body)?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, id);
        Err(server_unavailable())
    }
}

/// Create (or resend) a record, or update the record `id`.
///
/// # Errors
///
/// Transport and status failures, including envelope-level rejections the
/// server relays as non-2xx.
pub async fn save_record(
    kind: EntityKind,
    mode: FormMode,
    id: Option<&str>,
    payload: Map<String, Value>,
) -> Result<(), AppError> {
    #[cfg(feature = "hydrate")]
    {
        let (method, path) = save_target(kind, mode, id);
        send(method, &path, Some(&Value::Object(payload))).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, mode, id, payload);
        Err(server_unavailable())
    }
}

/// Delete the record `id`.
///
/// # Errors
///
/// Transport and status failures.
pub async fn delete_record(kind: EntityKind, id: &str) -> Result<(), AppError> {
    #[cfg(feature = "hydrate")]
    {
        send("DELETE", &item_path(kind, id), None).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, id);
        Err(server_unavailable())
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn reorder_payload(ids: &[String], offset: usize) -> serde_json::Value {
    serde_json::json!({ "ids": ids, "offset": offset })
}

/// Persist a manual row order for one page; `offset` is the number of rows
/// on earlier pages, so the first id gets position `offset + 1`.
///
/// # Errors
///
/// Transport and status failures.
pub async fn persist_order(kind: EntityKind, ids: Vec<String>, offset: usize) -> Result<(), AppError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = reorder_payload(&ids, offset);
        send("POST", &reorder_path(kind), Some(&payload)).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, ids, offset);
        Err(server_unavailable())
    }
}

/// Upload image files and return their hosted URLs, in input order.
///
/// # Errors
///
/// `AppError::Upload` when the browser cannot build the form or the host
/// rejects a file.
#[cfg(feature = "hydrate")]
pub async fn upload_images(files: &[web_sys::File], folder: &str) -> Result<Vec<String>, AppError> {
    use gloo_net::http::{Method, RequestBuilder};

    let upload_err = |e: wasm_bindgen::JsValue| AppError::Upload(format!("{e:?}"));
    let form = web_sys::FormData::new().map_err(upload_err)?;
    for file in files {
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(upload_err)?;
    }
    let url = upload_url(folder);
    let resp = RequestBuilder::new(&url)
        .method(Method::POST)
        .body(form)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    let body = read_json(&resp, &url).await?;
    serde_json::from_value::<gateway::asset::Uploaded>(body)
        .map(gateway::asset::Uploaded::into_urls)
        .map_err(|e| AppError::Upload(e.to_string()))
}

/// Remove a previously uploaded image from the asset host.
///
/// # Errors
///
/// Transport and status failures.
pub async fn delete_asset(url: &str) -> Result<(), AppError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "url": url });
        send("DELETE", UPLOADS_PATH, Some(&payload)).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(server_unavailable())
    }
}

/// Latest published news for the public landing page.
///
/// # Errors
///
/// Transport, status, and decode failures.
pub async fn fetch_news_feed() -> Result<Vec<Record>, AppError> {
    #[cfg(feature = "hydrate")]
    {
        let body = send("GET", NEWS_FEED_PATH, None).await?;
        Ok(ListData::<Record>::from_body(body)?.docs)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(server_unavailable())
    }
}
