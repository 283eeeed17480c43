//! Failures at the backend boundary.
//!
//! ERROR HANDLING
//! ==============
//! A 401 is its own variant because it ends the session rather than being
//! shown as a generic failure. Every other non-2xx keeps its status and the
//! best message the body offers.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Missing or rejected credentials.
    #[error("unauthorized: {path}")]
    Unauthenticated { path: String },

    /// Any other non-2xx response.
    #[error("error {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The asset host rejected or never received a file.
    #[error("upload failed: {0}")]
    Upload(String),
}

impl GatewayError {
    /// Classify a non-2xx response.
    #[must_use]
    pub fn from_response(status: u16, path: &str, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthenticated { path: path.to_owned() };
        }
        Self::Status { status, message: message_from_body(body) }
    }

    /// HTTP status to relay to the browser.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthenticated { .. } => 401,
            Self::Status { status, .. } => *status,
            Self::Transport(_) | Self::Decode(_) | Self::Upload(_) => 502,
        }
    }

    /// Text suitable for a `{ "message": .. }` body.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Best-effort `message` (or `msg`) field from a JSON error body.
#[must_use]
pub fn message_from_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("msg"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned())
}
