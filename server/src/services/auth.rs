//! Admin authentication against the backend: login and token refresh.
//!
//! STATE MACHINE
//! =============
//! A session starts at login with an access/refresh token pair. Each
//! authenticated request first calls `ensure_fresh`: a token inside its
//! expiry leeway is refreshed through `GET /auth/refresh`, one refresh per
//! session at a time; a failed refresh removes the session and the request
//! is answered 401.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use gateway::{ApiRequest, GatewayError, ensure_success};
use serde::Deserialize;
use serde_json::{Value, json};

use super::backend::Backend;
use super::session::{AdminProfile, Session, SessionStore, now_ms};

pub const LOGIN_PATH: &str = "/auth/admin-login";
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("session expired")]
    SessionExpired,
    #[error("unexpected auth response: {0}")]
    Decode(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(alias = "_id", default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshData {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// `data` object of a `{ status, data }` auth response.
fn auth_data<T: serde::de::DeserializeOwned>(mut body: Value) -> Result<T, AuthError> {
    let data = body.get_mut("data").map(Value::take).unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|e| AuthError::Decode(e.to_string()))
}

/// Exchange admin credentials for a new session.
///
/// # Errors
///
/// `InvalidCredentials` when the backend rejects the login (401 or a failed
/// envelope status); other gateway failures pass through.
pub async fn admin_login(backend: &dyn Backend, email: &str, password: &str) -> Result<Session, AuthError> {
    let request = ApiRequest::post(LOGIN_PATH).json(json!({ "email": email, "password": password }));
    let body = match backend.send(&request, None).await {
        Ok(body) => body,
        Err(GatewayError::Unauthenticated { .. }) => {
            return Err(AuthError::InvalidCredentials("Invalid email or password".to_owned()));
        }
        Err(GatewayError::Status { status, message }) if (400..500).contains(&status) => {
            return Err(AuthError::InvalidCredentials(message));
        }
        Err(e) => return Err(e.into()),
    };
    ensure_success(&body).map_err(|e| AuthError::InvalidCredentials(e.message()))?;

    let data: LoginData = auth_data(body)?;
    let name = if data.name.is_empty() { data.email.clone() } else { data.name };
    let profile = AdminProfile { id: data.id, name, email: data.email, role: data.role, image: data.image };
    Ok(Session::new(data.access_token, data.refresh_token, profile))
}

/// Obtain a new access token with the session's refresh token.
///
/// # Errors
///
/// `SessionExpired` when the backend refuses the refresh token.
pub async fn refresh_session(backend: &dyn Backend, session: &Session) -> Result<Session, AuthError> {
    let request = ApiRequest::get(REFRESH_PATH);
    let body = backend
        .send(&request, Some(&session.refresh_token))
        .await
        .map_err(|e| match e {
            GatewayError::Unauthenticated { .. } | GatewayError::Status { .. } => AuthError::SessionExpired,
            other => other.into(),
        })?;
    ensure_success(&body).map_err(|_| AuthError::SessionExpired)?;

    let data: RefreshData = auth_data(body)?;
    let mut renewed = session.clone();
    renewed.renew(data.access_token, data.refresh_token);
    Ok(renewed)
}

/// The session for `id`, refreshed first when its access token is expiring.
///
/// Refreshes of one session are serialized: concurrent requests wait for the
/// first refresh and then reuse its tokens instead of presenting a refresh
/// token the backend has already rotated.
///
/// # Errors
///
/// `SessionExpired` for an unknown id or a failed refresh; the session is
/// removed in the latter case unless another request already renewed it.
pub async fn ensure_fresh(backend: &dyn Backend, sessions: &SessionStore, id: &str) -> Result<Session, AuthError> {
    let session = sessions.get(id).await.ok_or(AuthError::SessionExpired)?;
    if !session.needs_refresh(now_ms()) {
        return Ok(session);
    }

    let lock = sessions.refresh_lock(id).await.ok_or(AuthError::SessionExpired)?;
    let _guard = lock.lock().await;
    let session = sessions.get(id).await.ok_or(AuthError::SessionExpired)?;
    if !session.needs_refresh(now_ms()) {
        return Ok(session);
    }

    match refresh_session(backend, &session).await {
        Ok(renewed) => {
            sessions.replace(id, renewed.clone()).await;
            tracing::debug!("access token refreshed");
            Ok(renewed)
        }
        Err(e) => {
            tracing::info!(error = %e, "session refresh failed; signing out");
            sessions.remove_if_refresh_token(id, &session.refresh_token).await;
            Err(AuthError::SessionExpired)
        }
    }
}
