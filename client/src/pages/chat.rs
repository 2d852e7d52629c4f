//! Chat layout: room list, live connection, and the routed room pane.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ChatLayout` is the parent route for `/chat` and `/chat/:room_id`. It owns
//! the realtime session for as long as it is mounted, keeps the room list
//! fresh, and re-resolves the selected room whenever the list or the route
//! changes. `ChatRoomPane` owns the open room's subscription and history.
//!
//! LIFECYCLE
//! =========
//! 1. Mount: fetch the room list; once it lands (which also refreshes an
//!    expired token) open the STOMP session.
//! 2. Route points at a room the list lacks: fetch that room alone.
//! 3. Route change: unsubscribe the previous room, open and subscribe the
//!    next one, load its history, send a read receipt.
//! 4. Tab becomes visible with a room open: send another read receipt.
//! 5. Unmount: cancel in-flight work, disconnect, drop the cached list.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::{use_location, use_navigate, use_params_map};

use crate::components::chat_detail::ChatDetail;
use crate::components::room_list::RoomList;
use crate::components::system_modal::SystemModalHost;
use crate::net::stomp_client::{ChatSocket, connect_stomp, disconnect_stomp, subscribe_room, unsubscribe_room};
use crate::net::types::Id;
use crate::state::auth::AuthState;
use crate::state::chat_room::ActiveRoomState;
use crate::state::chat_rooms::RoomListState;
use crate::util::alive::AliveFlag;
use crate::util::auth::install_unauth_redirect;

/// Room id from a `/chat/{id}` path; `None` for `/chat` or a malformed id.
pub(crate) fn room_id_from_path(path: &str) -> Option<Id> {
    let rest = path.strip_prefix("/chat")?;
    let segment = rest.strip_prefix('/')?.trim_end_matches('/');
    if segment.contains('/') {
        return None;
    }
    segment.parse().ok()
}

/// Parent route for every chat screen.
#[component]
pub fn ChatLayout() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let rooms = expect_context::<RwSignal<RoomListState>>();
    let active = expect_context::<RwSignal<ActiveRoomState>>();
    let socket = expect_context::<ChatSocket>();
    let location = use_location();
    install_unauth_redirect(auth, use_navigate());

    let alive = AliveFlag::new();
    on_cleanup({
        let alive = alive.clone();
        move || {
            alive.cancel();
            disconnect_stomp(socket);
            active.update(ActiveRoomState::close);
            rooms.set(RoomListState::default());
        }
    });
    let alive = StoredValue::new(alive);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    #[cfg(feature = "hydrate")]
    fetch_rooms(api.get_value(), alive.get_value(), rooms);

    let route_room_id = Memo::new(move |_| room_id_from_path(&location.pathname.get()));
    let revision = Memo::new(move |_| rooms.with(|r| r.revision));

    // Selection follows both the route and every full list replacement.
    Effect::new(move || {
        let room_id = route_room_id.get();
        revision.track();
        rooms.update(|r| r.reconcile_selected(room_id));
    });

    // Connect after the first list fetch so the token is known to be fresh.
    Effect::new(move || {
        if revision.get() == 0 {
            return;
        }
        let Some(user_id) = auth.with(AuthState::user_id) else {
            return;
        };
        let token = crate::util::cookie::read_cookie(crate::config::ACCESS_TOKEN_COOKIE);
        connect_stomp(socket, user_id, token);
    });

    // A routed room the list does not know yet (for example one just created
    // from a product page) is fetched on its own, once per id.
    let missing_room = Memo::new(move |_| rooms.with(RoomListState::missing_routed_room));
    let requested_room = StoredValue::new(None::<Id>);
    Effect::new(move || {
        let Some(room_id) = missing_room.get() else {
            return;
        };
        if requested_room.get_value() == Some(room_id) {
            return;
        }
        requested_room.set_value(Some(room_id));
        #[cfg(feature = "hydrate")]
        fetch_room(api.get_value(), alive.get_value(), rooms, room_id);
    });

    // A push for an unknown room means the list is behind; refetch once.
    Effect::new(move || {
        let needs_refetch = rooms.with(|r| r.stale && !r.loading && r.error.is_none());
        if !needs_refetch {
            return;
        }
        #[cfg(feature = "hydrate")]
        fetch_rooms(api.get_value(), alive.get_value(), rooms);
        #[cfg(not(feature = "hydrate"))]
        let _ = alive;
    });

    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener_untyped("visibilitychange", move |_| {
            if document().visibility_state() != web_sys::VisibilityState::Visible {
                return;
            }
            let Some(room_id) = active.with_untracked(|a| a.room_id) else {
                return;
            };
            mark_room_read(api.get_value(), rooms, room_id);
        });
        on_cleanup(move || handle.remove());
    }

    view! {
        <div class="chat-layout">
            <RoomList/>
            <section class="chat-layout__detail">
                <Outlet/>
            </section>
        </div>
    }
}

/// Placeholder pane for `/chat`.
#[component]
pub fn ChatEmptyPane() -> impl IntoView {
    view! {
        <div class="chat-empty">
            <p>"대화할 채팅방을 선택해 주세요."</p>
        </div>
    }
}

/// Pane for `/chat/:room_id`.
#[component]
pub fn ChatRoomPane() -> impl IntoView {
    let rooms = expect_context::<RwSignal<RoomListState>>();
    let active = expect_context::<RwSignal<ActiveRoomState>>();
    let socket = expect_context::<ChatSocket>();
    let params = use_params_map();
    let last_room = StoredValue::new(None::<Id>);

    let alive = AliveFlag::new();
    on_cleanup({
        let alive = alive.clone();
        move || {
            alive.cancel();
            if let Some(room_id) = last_room.try_get_value().flatten() {
                unsubscribe_room(socket, room_id);
            }
            active.update(ActiveRoomState::close);
        }
    });
    let alive = StoredValue::new(alive);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    let room_id = Memo::new(move |_| params.with(|p| p.get("room_id").and_then(|raw| raw.parse::<Id>().ok())));

    // The pane is reused across `/chat/:room_id` changes, so switch rooms here.
    Effect::new(move || {
        let next = room_id.get();
        let prev = last_room.get_value();
        if prev == next {
            return;
        }
        if let Some(prev) = prev {
            unsubscribe_room(socket, prev);
        }
        last_room.set_value(next);

        let Some(room_id) = next else {
            active.update(ActiveRoomState::close);
            return;
        };
        active.update(|a| a.open(room_id));
        subscribe_room(socket, room_id);

        #[cfg(feature = "hydrate")]
        {
            load_history(api.get_value(), alive.get_value(), active, room_id);
            mark_room_read(api.get_value(), rooms, room_id);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (alive, rooms);
    });

    view! {
        <div class="chat-room">
            <ChatDetail/>
            <SystemModalHost/>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn fetch_rooms(client: crate::net::ApiClient, alive: AliveFlag, rooms: RwSignal<RoomListState>) {
    rooms.update(|r| r.loading = true);
    leptos::task::spawn_local(async move {
        let result = crate::net::api::get_room_list(&client).await;
        alive.deliver(result, |result| match result {
            Ok(list) => rooms.update(|r| r.replace_rooms(list)),
            Err(e) => {
                leptos::logging::warn!("room list fetch failed: {e}");
                rooms.update(|r| r.fetch_failed(e.user_message()));
            }
        });
    });
}

#[cfg(feature = "hydrate")]
fn fetch_room(client: crate::net::ApiClient, alive: AliveFlag, rooms: RwSignal<RoomListState>, room_id: Id) {
    leptos::task::spawn_local(async move {
        let result = crate::net::api::get_room(&client, room_id).await;
        alive.deliver(result, |result| match result {
            Ok(room) => rooms.update(|r| r.apply_room_delta(room)),
            Err(e) => leptos::logging::warn!("room {room_id} fetch failed: {e}"),
        });
    });
}

#[cfg(feature = "hydrate")]
fn load_history(client: crate::net::ApiClient, alive: AliveFlag, active: RwSignal<ActiveRoomState>, room_id: Id) {
    leptos::task::spawn_local(async move {
        let result = crate::net::api::get_room_messages(&client, room_id).await;
        alive.deliver(result, |result| match result {
            Ok(history) => active.update(|a| a.load_history(room_id, history)),
            Err(e) => {
                leptos::logging::warn!("history fetch for room {room_id} failed: {e}");
                active.update(|a| a.history_failed(room_id, e.user_message()));
            }
        });
    });
}

/// Zero the room's unread count locally and send the receipt. Not deduplicated.
#[cfg(feature = "hydrate")]
fn mark_room_read(client: crate::net::ApiClient, rooms: RwSignal<RoomListState>, room_id: Id) {
    rooms.update(|r| r.mark_read_local(room_id));
    leptos::task::spawn_local(async move {
        crate::net::api::mark_chat_as_read(&client, room_id).await;
    });
}
