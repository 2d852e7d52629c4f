//! Chat room list with the live connection indicator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders `RoomListState::sorted_rooms` for the signed-in user: partner,
//! product thumbnail, last-message label, relative time, and unread badge.
//! Rendering only reads state.

#[cfg(test)]
#[path = "room_list_test.rs"]
mod room_list_test;

use leptos::prelude::*;

use crate::net::types::{ChatRoom, Id, LastMessage, SaleStatus};
use crate::state::auth::AuthState;
use crate::state::chat_rooms::RoomListState;
use crate::state::connection::{ConnectionState, ConnectionStatus};
use crate::util::format::{format_price, now_ms, relative_time, sale_status_label};
use crate::util::message_label::last_message_label;

#[component]
pub fn RoomList() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let rooms = expect_context::<RwSignal<RoomListState>>();
    let connection = expect_context::<RwSignal<ConnectionState>>();

    let status = move || connection.with(ConnectionState::status);
    let selected_id = Memo::new(move |_| rooms.with(|r| r.selected.as_ref().map(|s| s.room_id)));

    view! {
        <aside class="room-list">
            <header class="room-list__header">
                <h2>"채팅"</h2>
                <span class=move || format!("live-indicator {}", connection_status_class(status()))>
                    {move || connection_status_label(status())}
                </span>
            </header>

            <Show when=move || rooms.with(|r| r.error.is_some())>
                <p class="room-list__error">{move || rooms.with(|r| r.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || rooms.with(|r| r.loading && r.rooms.is_empty())>
                <p class="room-list__loading">"불러오는 중..."</p>
            </Show>
            <Show when=move || rooms.with(|r| !r.loading && r.error.is_none() && r.rooms.is_empty())>
                <p class="room-list__empty">"아직 대화가 없어요."</p>
            </Show>

            <ul class="room-list__items">
                <For
                    each=move || {
                        let me = auth.with(AuthState::user_id).unwrap_or_default();
                        rooms.with(|r| r.sorted_rooms().iter().map(|room| RoomRowView::new(room, me)).collect::<Vec<_>>())
                    }
                    key=|row| row.clone()
                    children=move |row| {
                        let room_id = row.room_id;
                        view! { <RoomRow row=row selected=Signal::derive(move || selected_id.get() == Some(room_id))/> }
                    }
                />
            </ul>
        </aside>
    }
}

/// Everything a row renders. Rows are keyed on the whole value, so a room
/// delta that changes any visible field rebuilds its row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct RoomRowView {
    room_id: Id,
    partner: String,
    product_title: String,
    thumbnail_url: Option<String>,
    sale_status: SaleStatus,
    price: i64,
    preview: String,
    last_at_ms: Option<i64>,
    read: bool,
    unread_count: u32,
}

impl RoomRowView {
    fn new(room: &ChatRoom, me: Id) -> Self {
        let last = room.last_message.as_ref();
        Self {
            room_id: room.room_id,
            partner: room.partner_of(me).nickname.clone(),
            product_title: room.product.title.clone(),
            thumbnail_url: room.product.thumbnail_url.clone(),
            sale_status: room.product.sale_status,
            price: room.product.price,
            preview: last.map(|m| last_message_label(&m.kind, &m.content)).unwrap_or_default(),
            last_at_ms: last.and_then(LastMessage::timestamp_ms),
            read: last.is_none_or(|m| m.read),
            unread_count: room.unread_count,
        }
    }
}

#[component]
fn RoomRow(row: RoomRowView, selected: Signal<bool>) -> impl IntoView {
    let href = format!("/chat/{}", row.room_id);
    let when = row.last_at_ms.map(|ts| relative_time(ts, now_ms())).unwrap_or_default();
    let status = (row.sale_status != SaleStatus::OnSale).then(|| sale_status_label(row.sale_status));
    let unread = !row.read;
    let badge = unread_badge(row.unread_count);

    view! {
        <li class="room-row" class:room-row--selected=move || selected.get()>
            <a href=href class="room-row__link">
                {row.thumbnail_url.map(|src| view! { <img class="room-row__thumb" src=src alt=""/> })}
                <div class="room-row__body">
                    <p class="room-row__title">
                        <span class="room-row__partner">{row.partner}</span>
                        <span class="room-row__time">{when}</span>
                    </p>
                    <p class="room-row__product">
                        {status.map(|label| view! { <span class="room-row__status">{label}</span> })}
                        <span>{row.product_title}</span>
                        <span class="room-row__price">{format_price(row.price)}</span>
                    </p>
                    <p class="room-row__preview" class:room-row__preview--unread=unread>{row.preview}</p>
                </div>
                {badge.map(|text| view! { <span class="room-row__badge">{text}</span> })}
            </a>
        </li>
    }
}

fn connection_status_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "live-indicator--connected",
        ConnectionStatus::Connecting => "live-indicator--connecting",
        ConnectionStatus::Disconnected => "live-indicator--disconnected",
    }
}

fn connection_status_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "실시간",
        ConnectionStatus::Connecting => "연결 중",
        ConnectionStatus::Disconnected => "연결 끊김",
    }
}

/// Badge text for an unread count; hidden at zero, capped at 99+.
fn unread_badge(count: u32) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_owned()),
    }
}
