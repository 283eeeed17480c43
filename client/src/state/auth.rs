//! Auth-session state for the signed-in administrator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the admin shell's route guard and the header profile block to
//! coordinate login redirects and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::AdminUser;

/// Current admin (if any) and whether the initial current-user lookup is pending.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<AdminUser>,
    pub loading: bool,
}

impl AuthState {
    /// State before the current-user lookup has answered.
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    /// Drop the user after logout or an expired session.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.loading = false;
    }
}
