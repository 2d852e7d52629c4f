use super::*;
use crate::net::types::{Role, User};

fn user(role: Role) -> User {
    User { user_id: 1, nickname: "Alice".to_owned(), email: None, profile_image_url: None, role }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
    assert!(!should_redirect_non_admin(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState { user: Some(user(Role::User)), loading: false };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn non_admin_is_redirected_from_admin_pages() {
    assert!(should_redirect_non_admin(&AuthState { user: Some(user(Role::User)), loading: false }));
    assert!(!should_redirect_non_admin(&AuthState { user: Some(user(Role::Admin)), loading: false }));
}
