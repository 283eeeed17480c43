//! User-facing error taxonomy for the admin UI.
//!
//! ERROR HANDLING
//! ==============
//! Every failure a page can hit is folded into one of four categories. Each
//! maps to exactly one toast (`toast_title` + `toast_description`); the full
//! `detail` goes to the console log, never into the UI.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use gateway::GatewayError;

use crate::state::form::FieldErrors;

/// Page-level load failure message.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data. Please try again later.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("{} field(s) failed validation", .0.len())]
    Validation(FieldErrors),
    #[error("session expired")]
    Unauthenticated,
    #[error("upload failed: {0}")]
    Upload(String),
    #[error(transparent)]
    Gateway(GatewayError),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthenticated { .. } => Self::Unauthenticated,
            GatewayError::Upload(message) => Self::Upload(message),
            other => Self::Gateway(other),
        }
    }
}

impl AppError {
    pub fn toast_title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Please fix the highlighted fields.",
            Self::Unauthenticated => "Your session has expired.",
            Self::Upload(_) => "Image upload failed.",
            Self::Gateway(_) => "Uh oh! Something went wrong.",
        }
    }

    pub fn toast_description(&self) -> String {
        match self {
            Self::Validation(_) => "Some values are missing or invalid.".to_owned(),
            Self::Unauthenticated => "Please sign in again.".to_owned(),
            Self::Upload(_) => "The image could not be stored. Try a smaller file.".to_owned(),
            Self::Gateway(GatewayError::Status { message, .. }) if !message.is_empty() => message.clone(),
            Self::Gateway(_) => "There was a problem with your request.".to_owned(),
        }
    }

    /// Full diagnostic text for the console.
    pub fn detail(&self) -> String {
        match self {
            Self::Validation(errors) => errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}
