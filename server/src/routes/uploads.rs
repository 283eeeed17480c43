//! Image upload and delete routes, forwarded to the asset host.

#[cfg(test)]
#[path = "uploads_test.rs"]
mod uploads_test;

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use gateway::asset::{Uploaded, public_id_from_url};
use serde::Deserialize;

use super::auth::AuthSession;
use super::error::ApiError;
use crate::services::assets::{AssetHost, UploadFile};
use crate::state::AppState;

/// Request body limit for the upload route.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

const FILE_FIELD: &str = "file";

fn asset_host(state: &AppState) -> Result<&dyn AssetHost, ApiError> {
    state
        .assets
        .as_deref()
        .ok_or_else(|| ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Image uploads are not configured"))
}

/// Keep folder names to plain path segments.
fn sanitize_folder(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    let valid = !trimmed.is_empty()
        && trimmed
            .split('/')
            .all(|seg| !seg.is_empty() && seg != ".." && seg.chars().all(|c| c.is_ascii_alphanumeric() || "-_".contains(c)));
    valid.then(|| trimmed.to_owned())
}

#[derive(Deserialize)]
pub struct UploadQuery {
    folder: Option<String>,
}

/// `POST /api/admin/uploads?folder=..`: one or many `file` parts.
pub async fn upload(
    State(state): State<AppState>,
    _auth: AuthSession,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<Uploaded>, ApiError> {
    let host = asset_host(&state)?;
    let folder = match query.folder.as_deref() {
        Some(raw) => sanitize_folder(raw).ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Invalid folder"))?,
        None => host.default_folder().to_owned(),
    };

    let bad_request = |e: axum::extract::multipart::MultipartError| ApiError::new(StatusCode::BAD_REQUEST, e.body_text());
    let mut urls = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(bad_request)?.to_vec();
        let url = host.upload(UploadFile { file_name, content_type, bytes }, &folder).await?;
        urls.push(url);
    }

    if urls.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "No file provided"));
    }
    tracing::info!(count = urls.len(), %folder, "images uploaded");
    Ok(Json(Uploaded::from_urls(urls)))
}

#[derive(Deserialize)]
pub struct DeleteAssetRequest {
    url: String,
}

/// `DELETE /api/admin/uploads` with `{ url }`.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthSession,
    Json(body): Json<DeleteAssetRequest>,
) -> Result<StatusCode, ApiError> {
    let host = asset_host(&state)?;
    let public_id = public_id_from_url(&body.url).map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    host.destroy(&public_id).await?;
    tracing::info!(%public_id, "image deleted");
    Ok(StatusCode::NO_CONTENT)
}
