//! Open-room pane: header, transaction actions, messages, and the send box.
//!
//! SYSTEM CONTEXT
//! ==============
//! Messages render from `ActiveRoomState` (newest first, shown bottom-up).
//! Outbound messages go over STOMP; the room subscription echoes them back,
//! so nothing is appended locally on send.

#[cfg(test)]
#[path = "chat_detail_test.rs"]
mod chat_detail_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::net::stomp_client::{ChatSocket, send_chat_message};
use crate::net::types::{ChatMessage, ChatRoom, Id, MessageKind, OutgoingChatMessage};
use crate::state::auth::AuthState;
use crate::state::chat_room::{ActiveRoomState, validate_message};
use crate::state::chat_rooms::RoomListState;
use crate::state::toast::ToastState;
use crate::util::format::{clock_time, format_price, sale_status_label};
use crate::util::message_label::fixed_label;

/// Convert a `datetime-local` input value into the backend's timestamp.
pub(crate) fn reservation_time(input: &str) -> Result<String, &'static str> {
    let parsed = chrono::NaiveDateTime::parse_from_str(input.trim(), "%Y-%m-%dT%H:%M")
        .map_err(|_| "예약 시간을 선택해 주세요.")?;
    Ok(parsed.format("%Y-%m-%dT%H:%M:%S").to_string())
}

#[component]
pub fn ChatDetail() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let rooms = expect_context::<RwSignal<RoomListState>>();
    let active = expect_context::<RwSignal<ActiveRoomState>>();
    let socket = expect_context::<ChatSocket>();
    let draft = RwSignal::new(String::new());
    let send_error = RwSignal::new(None::<&'static str>);

    let me = move || auth.with(AuthState::user_id).unwrap_or_default();

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(room_id) = active.with_untracked(|a| a.room_id) else {
            return;
        };
        let content = match validate_message(&draft.get_untracked()) {
            Ok(content) => content,
            Err(message) => {
                send_error.set(Some(message));
                return;
            }
        };
        let message = OutgoingChatMessage { room_id, content, kind: MessageKind::Text };
        match send_chat_message(socket, &message) {
            Ok(()) => {
                draft.set(String::new());
                send_error.set(None);
            }
            Err(message) => send_error.set(Some(message)),
        }
    };

    view! {
        <div class="chat-detail">
            {move || {
                rooms
                    .with(|r| r.selected.clone())
                    .map(|room| {
                        let me = me();
                        view! { <RoomHeader room=room me=me/> }
                    })
            }}

            <Show when=move || active.with(|a| a.error.is_some())>
                <p class="chat-detail__error">{move || active.with(|a| a.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || active.with(|a| a.loading)>
                <p class="chat-detail__loading">"메시지를 불러오는 중..."</p>
            </Show>

            <ol class="chat-detail__messages">
                <For
                    each=move || active.with(|a| a.messages.clone())
                    key=|msg| (msg.message_id, msg.created_at.clone(), msg.sender_id)
                    children=move |msg| {
                        let mine = msg.sender_id == me();
                        view! { <MessageBubble msg=msg mine=mine/> }
                    }
                />
            </ol>

            <form class="chat-detail__composer" on:submit=on_send>
                <input
                    class="chat-detail__input"
                    type="text"
                    placeholder="메시지를 입력하세요"
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        draft.set(event_target_value(&ev));
                        send_error.set(None);
                    }
                />
                <button class="btn btn--primary" type="submit">
                    "전송"
                </button>
            </form>
            {move || send_error.get().map(|text| view! { <p class="chat-detail__send-error">{text}</p> })}
        </div>
    }
}

#[component]
fn MessageBubble(msg: ChatMessage, mine: bool) -> impl IntoView {
    let time = msg.timestamp_ms().map(clock_time).unwrap_or_default();
    if msg.kind.is_system() {
        let label = fixed_label(&msg.kind).map_or_else(|| msg.content.clone(), str::to_owned);
        return view! {
            <li class="message message--system">
                <span>{label}</span>
            </li>
        }
        .into_any();
    }
    let body = if msg.kind == MessageKind::Image {
        view! { <img class="message__image" src=msg.content.clone() alt="이미지"/> }.into_any()
    } else {
        view! { <span class="message__text">{msg.content.clone()}</span> }.into_any()
    };
    view! {
        <li class="message" class:message--mine=mine>
            {body}
            <time class="message__time">{time}</time>
        </li>
    }
    .into_any()
}

#[component]
fn RoomHeader(room: ChatRoom, me: Id) -> impl IntoView {
    let partner = room.partner_of(me).nickname.clone();
    let is_seller = room.is_seller(me);
    let product_href = format!("/products/{}", room.product.product_id);

    view! {
        <header class="chat-detail__header">
            <p class="chat-detail__partner">{partner}</p>
            <a class="chat-detail__product" href=product_href>
                <span>{room.product.title.clone()}</span>
                <span>{format_price(room.product.price)}</span>
                <span>{sale_status_label(room.product.sale_status)}</span>
            </a>
            <RoomActions room_id=room.room_id is_seller=is_seller video_call=room.product.video_call_available/>
        </header>
    }
}

/// Transaction actions available from the header.
#[component]
fn RoomActions(room_id: Id, is_seller: bool, video_call: bool) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let reserve_at = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    let run_action = move |action: RoomAction| {
        if busy.get_untracked() {
            return;
        }
        let reserved_at = if action == RoomAction::Reserve {
            match reservation_time(&reserve_at.get_untracked()) {
                Ok(at) => Some(at),
                Err(message) => {
                    toasts.update(|t| {
                        t.error(message);
                    });
                    return;
                }
            }
        } else {
            None
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            leptos::task::spawn_local(async move {
                let result = match action {
                    RoomAction::Reserve => {
                        crate::net::api::reserve_video_call(&client, room_id, reserved_at.as_deref().unwrap_or_default())
                            .await
                    }
                    RoomAction::CancelReservation => crate::net::api::cancel_video_call(&client, room_id).await,
                    RoomAction::RequestDeposit => crate::net::api::request_deposit(&client, room_id).await,
                };
                match result {
                    Ok(()) => toasts.update(|t| {
                        t.push(crate::state::toast::ToastKind::Info, action.done_message());
                    }),
                    Err(e) => {
                        leptos::logging::warn!("room {room_id} action failed: {e}");
                        toasts.update(|t| {
                            t.api_error(&e);
                        });
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (room_id, reserved_at);
            busy.set(false);
        }
    };

    view! {
        <div class="room-actions">
            <Show when=move || !is_seller && video_call>
                <input
                    class="room-actions__time"
                    type="datetime-local"
                    prop:value=move || reserve_at.get()
                    on:input=move |ev| reserve_at.set(event_target_value(&ev))
                />
                <button class="btn" disabled=move || busy.get() on:click=move |_| run_action(RoomAction::Reserve)>
                    "영상통화 예약"
                </button>
                <button
                    class="btn"
                    disabled=move || busy.get()
                    on:click=move |_| run_action(RoomAction::CancelReservation)
                >
                    "예약 취소"
                </button>
            </Show>
            <Show when=move || is_seller>
                <button
                    class="btn btn--primary"
                    disabled=move || busy.get()
                    on:click=move |_| run_action(RoomAction::RequestDeposit)
                >
                    "입금 요청"
                </button>
            </Show>
        </div>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoomAction {
    Reserve,
    CancelReservation,
    RequestDeposit,
}

impl RoomAction {
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    fn done_message(self) -> &'static str {
        match self {
            Self::Reserve => "영상통화를 예약했어요.",
            Self::CancelReservation => "영상통화 예약을 취소했어요.",
            Self::RequestDeposit => "입금을 요청했어요.",
        }
    }
}
