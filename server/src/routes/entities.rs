//! Backend proxy routes for every administered entity.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser addresses entities by slug under `/api/admin/{entity}`. Each
//! handler resolves the slug to an `EntityKind`, lets it describe the backend
//! call, and forwards that call with the session's bearer token.
//!
//! ERROR HANDLING
//! ==============
//! Backend envelopes that report failure in their body are relayed as the
//! matching non-2xx status. A backend 401 ends the session: it is removed,
//! the cookie is cleared, and the browser gets 401.

#[cfg(test)]
#[path = "entities_test.rs"]
mod entities_test;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gateway::{ApiRequest, EntityKind, GatewayError, ListParams, PageQuery, ensure_success};
use serde::Deserialize;
use serde_json::Value;

use super::auth::{AuthSession, signed_out};
use super::error::ApiError;
use crate::state::AppState;

/// Headlines returned by the public news feed.
pub const NEWS_FEED_SIZE: usize = 3;

type ProxyResult = Result<Json<Value>, Response>;

fn entity_kind(slug: &str) -> Result<EntityKind, Response> {
    EntityKind::from_slug(slug).ok_or_else(|| ApiError::not_found(format!("Unknown entity: {slug}")).into_response())
}

fn unsupported(kind: EntityKind, action: &str) -> Response {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{} records cannot be {action}", kind.label()),
    )
    .into_response()
}

/// Forward `request` for the signed-in admin and relay the JSON body.
async fn forward(state: &AppState, auth: &AuthSession, request: ApiRequest) -> ProxyResult {
    let result = state
        .backend
        .send(&request, Some(&auth.session.access_token))
        .await
        .and_then(|body| ensure_success(&body).map(|()| body));

    match result {
        Ok(body) => Ok(Json(body)),
        Err(GatewayError::Unauthenticated { path }) => {
            tracing::info!(%path, "backend rejected access token; ending session");
            state.sessions.remove(&auth.id).await;
            Err(signed_out(state.cookie_secure, ApiError::unauthorized()))
        }
        Err(e) => {
            tracing::warn!(error = %e, method = request.method.as_str(), path = %request.path, "backend call failed");
            Err(ApiError::from(e).into_response())
        }
    }
}

/// `GET /api/admin/{entity}?page&limit&search`: one page of records.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(entity): Path<String>,
    Query(params): Query<ListParams>,
) -> ProxyResult {
    let kind = entity_kind(&entity)?;
    forward(&state, &auth, kind.list_request(&params.page_query())).await
}

/// `GET /api/admin/{entity}/options`: every record, for choice fields.
pub async fn options(State(state): State<AppState>, auth: AuthSession, Path(entity): Path<String>) -> ProxyResult {
    let kind = entity_kind(&entity)?;
    forward(&state, &auth, kind.reference_request()).await
}

/// `POST /api/admin/{entity}`: create (and notification resend).
pub async fn create(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(entity): Path<String>,
    Json(body): Json<Value>,
) -> ProxyResult {
    let kind = entity_kind(&entity)?;
    forward(&state, &auth, kind.create_request(body)).await
}

/// `GET /api/admin/{entity}/{id}`
pub async fn find(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((entity, id)): Path<(String, String)>,
) -> ProxyResult {
    let kind = entity_kind(&entity)?;
    forward(&state, &auth, kind.find_request(&id)).await
}

/// `PATCH /api/admin/{entity}/{id}`: 405 for kinds without in-place update.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((entity, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> ProxyResult {
    let kind = entity_kind(&entity)?;
    let request = kind.update_request(&id, body).ok_or_else(|| unsupported(kind, "updated"))?;
    forward(&state, &auth, request).await
}

/// `DELETE /api/admin/{entity}/{id}`
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((entity, id)): Path<(String, String)>,
) -> ProxyResult {
    let kind = entity_kind(&entity)?;
    forward(&state, &auth, kind.delete_request(&id)).await
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    ids: Vec<String>,
    /// Rows on pages before the reordered one.
    #[serde(default)]
    offset: usize,
}

/// `POST /api/admin/{entity}/reorder`: persist a manual row order.
pub async fn reorder(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(entity): Path<String>,
    Json(body): Json<ReorderRequest>,
) -> ProxyResult {
    let kind = entity_kind(&entity)?;
    if body.ids.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "No rows to reorder").into_response());
    }
    let request = kind.reorder_request(&body.ids, body.offset).ok_or_else(|| unsupported(kind, "reordered"))?;
    forward(&state, &auth, request).await
}

/// `GET /api/public/news`: latest headlines for the landing page, no session.
pub async fn public_news(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let page = PageQuery { page_size: NEWS_FEED_SIZE, ..PageQuery::default() };
    let request = EntityKind::News.list_request(&page);
    let body = state.backend.send(&request, None).await.inspect_err(|e| {
        tracing::warn!(error = %e, "news feed unavailable");
    })?;
    ensure_success(&body)?;
    Ok(Json(body))
}
