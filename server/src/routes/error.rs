//! JSON error responses for API routes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gateway::GatewayError;
use serde_json::json;

use crate::services::assets::AssetError;
use crate::services::auth::AuthError;

/// `(status, { "message": .. })`, the only error shape the browser reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Not authenticated")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::BAD_GATEWAY);
        Self::new(status, err.message())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(message) => Self::new(StatusCode::UNAUTHORIZED, message),
            AuthError::SessionExpired => Self::unauthorized(),
            AuthError::Decode(message) => Self::new(StatusCode::BAD_GATEWAY, message),
            AuthError::Gateway(inner) => inner.into(),
        }
    }
}

impl From<AssetError> for ApiError {
    fn from(err: AssetError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, err.to_string())
    }
}
