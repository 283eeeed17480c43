//! Auth routes: admin login, logout, and the current profile.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use super::error::ApiError;
use crate::services::auth as auth_svc;
use crate::services::session::{AdminProfile, Session};
use crate::state::AppState;

pub const COOKIE_NAME: &str = "admin_session";

pub(crate) fn session_cookie(id: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub(crate) fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Error response that also clears the session cookie.
pub(crate) fn signed_out(secure: bool, err: ApiError) -> Response {
    (CookieJar::new().add(cleared_cookie(secure)), err).into_response()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated admin session, refreshed if its access token was expiring.
/// Use as a handler parameter to require authentication.
pub struct AuthSession {
    pub id: String,
    pub session: Session,
}

impl<S> axum::extract::FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let id = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default().to_owned();
        if id.is_empty() {
            return Err(ApiError::unauthorized().into_response());
        }

        let app_state = AppState::from_ref(state);
        match auth_svc::ensure_fresh(app_state.backend.as_ref(), &app_state.sessions, &id).await {
            Ok(session) => Ok(Self { id, session }),
            Err(e) => Err(signed_out(app_state.cookie_secure, e.into())),
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// `POST /api/auth/login`: exchange credentials for a session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AdminProfile>), ApiError> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Email and password are required"));
    }

    let session = auth_svc::admin_login(state.backend.as_ref(), email, &body.password)
        .await
        .inspect_err(|e| tracing::info!(error = %e, "admin login rejected"))?;
    let profile = session.profile.clone();
    let id = state.sessions.create(session).await;
    tracing::info!(admin = %profile.email, "admin signed in");

    Ok((jar.add(session_cookie(id, state.cookie_secure)), Json(profile)))
}

/// `POST /api/auth/logout`: drop the session (if any) and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(id) = jar.get(COOKIE_NAME).map(Cookie::value) {
        state.sessions.remove(id).await;
    }
    (jar.add(cleared_cookie(state.cookie_secure)), StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`: profile of the signed-in admin.
pub async fn me(auth: AuthSession) -> Json<AdminProfile> {
    Json(auth.session.profile)
}
