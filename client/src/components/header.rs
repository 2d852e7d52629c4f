//! Top navigation bar with the unread badge and session controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered on every route. Shows the chat unread total from the room list
//! (which is only populated while the chat layout is mounted) and the admin
//! link for admins.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::net::stomp_client::{ChatSocket, disconnect_stomp};
use crate::state::auth::AuthState;
use crate::state::chat_rooms::RoomListState;

/// Backend route that starts the OAuth login flow.
const LOGIN_PATH: &str = "/oauth2/authorization/kakao";

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let rooms = expect_context::<RwSignal<RoomListState>>();
    let socket = expect_context::<ChatSocket>();
    let navigate = use_navigate();
    let logged_out = RwSignal::new(false);

    Effect::new(move || {
        if logged_out.get() {
            logged_out.set(false);
            navigate("/", NavigateOptions::default());
        }
    });

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    let unread = move || rooms.with(RoomListState::total_unread);
    let nickname = move || auth.with(|a| a.user.as_ref().map(|u| u.nickname.clone()));
    let login_href = ClientConfig::current().api_url(LOGIN_PATH);

    let on_logout = move |_| {
        disconnect_stomp(socket);
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::net::api::logout(&client).await {
                    leptos::logging::warn!("logout request failed: {e}");
                }
                crate::util::cookie::clear_cookie(crate::config::ACCESS_TOKEN_COOKIE);
                auth.set(AuthState { user: None, loading: false });
                logged_out.set(true);
            });
        }
    };

    view! {
        <header class="site-header">
            <a href="/" class="site-header__logo">
                "중고마켓"
            </a>
            <span class="site-header__spacer"></span>
            {move || match nickname() {
                Some(name) => {
                    view! {
                        <nav class="site-header__nav">
                            <a href="/chat" class="site-header__link">
                                "채팅"
                                <Show when=move || { unread() > 0 }>
                                    <span class="site-header__badge">{unread}</span>
                                </Show>
                            </a>
                            <a href="/mypage" class="site-header__link">
                                "마이페이지"
                            </a>
                            <Show when=move || auth.with(AuthState::is_admin)>
                                <a href="/admin" class="site-header__link">
                                    "관리자"
                                </a>
                            </Show>
                            <span class="site-header__user">{name}</span>
                            <button class="btn site-header__logout" on:click=on_logout>
                                "로그아웃"
                            </button>
                        </nav>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <a href=login_href.clone() class="btn btn--primary site-header__login" rel="external">
                            "로그인"
                        </a>
                    }
                        .into_any()
                }
            }}
        </header>
    }
}
