//! Route-level access control for server-rendered pages.
//!
//! Signed-in state is inferred from the session cookie alone; the token is
//! never validated here. The backend rejects a bad token on the first API
//! call and the client's refresh path takes over from there.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::config::ServerConfig;

/// Pages that need a signed-in user.
const PROTECTED_PREFIXES: &[&str] = &["/products/new", "/chat", "/mypage", "/signup", "/admin"];

/// Landing page for anonymous requests to a protected page.
pub const LOGIN_REQUIRED_PATH: &str = "/?login=required";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
}

/// Middleware state: which cookie carries the session, and whether to gate at all.
#[derive(Clone, Debug)]
pub struct GuardState {
    cookie_name: Arc<str>,
    enabled: bool,
}

impl GuardState {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self { cookie_name: Arc::from(config.session_cookie.as_str()), enabled: config.guard_enabled }
    }
}

/// `prefix` matches `path` exactly or as a leading path segment.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

pub(crate) fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| matches_prefix(path, prefix))
}

pub(crate) fn guard_decision(path: &str, has_token: bool) -> GuardDecision {
    if has_token || !is_protected(path) {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin
    }
}

/// Whether `headers` carry a non-empty `cookie_name` cookie.
pub(crate) fn has_session_cookie(headers: &HeaderMap, cookie_name: &str) -> bool {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .is_some_and(|cookie| !cookie.value().trim().is_empty())
}

pub async fn route_guard(State(guard): State<GuardState>, req: Request, next: Next) -> Response {
    if !guard.enabled {
        return next.run(req).await;
    }
    let has_token = has_session_cookie(req.headers(), &guard.cookie_name);
    match guard_decision(req.uri().path(), has_token) {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::RedirectToLogin => {
            tracing::debug!(path = %req.uri().path(), "anonymous request to protected page");
            Redirect::temporary(LOGIN_REQUIRED_PATH).into_response()
        }
    }
}
