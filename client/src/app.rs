//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::header::Header;
use crate::components::toast::ToastHost;
use crate::net::stomp_client::ChatSocket;
use crate::pages::{
    admin::AdminPage,
    chat::{ChatEmptyPane, ChatLayout, ChatRoomPane},
    home::HomePage,
    my_page::MyPage,
    payment::{PaymentFailPage, PaymentSuccessPage},
    product_detail::ProductDetailPage,
};
use crate::state::{
    auth::AuthState, chat_room::ActiveRoomState, chat_rooms::RoomListState, connection::ConnectionState,
    toast::ToastState,
};

/// Shared REST client handle. Browser-only: the client holds `Rc` state.
#[cfg(feature = "hydrate")]
pub type ApiHandle = StoredValue<crate::net::ApiClient, LocalStorage>;

/// The shared REST client provided by [`App`].
#[cfg(feature = "hydrate")]
pub fn use_api() -> ApiHandle {
    expect_context::<ApiHandle>()
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ko">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts, resolves the signed-in user, and sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState { user: None, loading: true });
    let connection = RwSignal::new(ConnectionState::default());
    let rooms = RwSignal::new(RoomListState::default());
    let active = RwSignal::new(ActiveRoomState::default());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(auth);
    provide_context(connection);
    provide_context(rooms);
    provide_context(active);
    provide_context(toasts);
    provide_context(ChatSocket::new(connection, rooms, active));

    #[cfg(feature = "hydrate")]
    {
        let api: ApiHandle = StoredValue::new_local(crate::net::ApiClient::new(crate::net::http::BrowserHttp));
        provide_context(api);

        let client = api.get_value();
        if client.access_token().is_none() {
            auth.set(AuthState { user: None, loading: false });
        } else {
            leptos::task::spawn_local(async move {
                let user = match crate::net::api::fetch_current_user(&client).await {
                    Ok(user) => Some(user),
                    Err(e) => {
                        leptos::logging::warn!("current user lookup failed: {e}");
                        None
                    }
                };
                auth.set(AuthState { user, loading: false });
            });
        }
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/market.css"/>
        <Title text="중고마켓"/>

        <Router>
            <Header/>
            <main class="app-main">
                <Routes fallback=|| "페이지를 찾을 수 없어요.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=(StaticSegment("products"), ParamSegment("id")) view=ProductDetailPage/>
                    <ParentRoute path=StaticSegment("chat") view=ChatLayout>
                        <Route path=StaticSegment("") view=ChatEmptyPane/>
                        <Route path=ParamSegment("room_id") view=ChatRoomPane/>
                    </ParentRoute>
                    <Route path=StaticSegment("mypage") view=MyPage/>
                    <Route path=(StaticSegment("payments"), StaticSegment("success")) view=PaymentSuccessPage/>
                    <Route path=(StaticSegment("payments"), StaticSegment("fail")) view=PaymentFailPage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}
