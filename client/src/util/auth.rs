//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages apply identical unauthenticated redirect behavior. The SSR
//! route gate covers first loads; this covers sessions that expire while the
//! app is open.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Home route with the login-required marker the gate also uses.
pub const LOGIN_REQUIRED_PATH: &str = "/?login=required";

/// True once auth has loaded and no user is present.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    state.is_anonymous()
}

/// True when an admin-only page should bounce the current user.
pub fn should_redirect_non_admin(state: &AuthState) -> bool {
    !state.loading && !state.is_admin()
}

/// Redirect home whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_REQUIRED_PATH, NavigateOptions::default());
        }
    });
}
