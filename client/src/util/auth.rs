//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every admin page applies identical unauthenticated redirect behavior, and
//! every failed request that reports an expired session funnels through
//! `report_error` so the redirect fires from one place.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::error::AppError;
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;

pub const LOGIN_PATH: &str = "/admin/login";

/// Whether the guard should send the browser to the login page.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to the login page whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.with(should_redirect_unauth) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}

/// Log a failure, show its toast, and end the session when it expired.
pub fn report_error(auth: RwSignal<AuthState>, toasts: RwSignal<ToastState>, context: &str, err: &AppError) {
    leptos::logging::error!("{context}: {}", err.detail());
    toasts.update(|t| {
        t.error(err.toast_title(), err.toast_description());
    });
    if err.is_unauthenticated() {
        auth.update(AuthState::sign_out);
    }
}
