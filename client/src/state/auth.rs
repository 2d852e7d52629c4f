//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by protected pages and user-aware components to coordinate login
//! redirects and identity-dependent rendering (seller vs buyer, admin).

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Id, Role, User};

/// Current user and whether the `/api/users/me` lookup is still pending.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// Signed-in user id, if known.
    pub fn user_id(&self) -> Option<Id> {
        self.user.as_ref().map(|u| u.user_id)
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Admin)
    }

    /// True once the lookup settled without a user.
    pub fn is_anonymous(&self) -> bool {
        !self.loading && self.user.is_none()
    }
}
