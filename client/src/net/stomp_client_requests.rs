//! Outbound STOMP frames for the chat destinations.

#[cfg(test)]
#[path = "stomp_client_requests_test.rs"]
mod stomp_client_requests_test;

use frames::{CodecError, Frame};

use crate::net::types::{Id, OutgoingChatMessage};

/// Per-user room-list delta topic prefix.
#[cfg(any(test, feature = "hydrate"))]
pub(super) const ROOM_LIST_TOPIC_PREFIX: &str = "/sub/chat/rooms/";
/// Per-room message topic prefix.
pub(super) const ROOM_TOPIC_PREFIX: &str = "/sub/chat/room/";
/// Application destination for outbound chat messages.
pub(super) const SEND_DESTINATION: &str = "/pub/chat/message";

#[cfg(any(test, feature = "hydrate"))]
const ROOM_LIST_SUBSCRIPTION_ID: &str = "rooms";

pub(super) fn room_subscription_id(room_id: Id) -> String {
    format!("room-{room_id}")
}

#[cfg(any(test, feature = "hydrate"))]
pub(super) fn room_list_subscribe_frame(user_id: Id) -> Frame {
    frames::subscribe_frame(ROOM_LIST_SUBSCRIPTION_ID, &format!("{ROOM_LIST_TOPIC_PREFIX}{user_id}"))
}

pub(super) fn room_subscribe_frame(room_id: Id) -> Frame {
    frames::subscribe_frame(&room_subscription_id(room_id), &format!("{ROOM_TOPIC_PREFIX}{room_id}"))
}

pub(super) fn room_unsubscribe_frame(room_id: Id) -> Frame {
    frames::unsubscribe_frame(&room_subscription_id(room_id))
}

pub(super) fn chat_message_frame(message: &OutgoingChatMessage) -> Result<Frame, CodecError> {
    frames::send_json_frame(SEND_DESTINATION, message)
}

#[cfg(any(test, feature = "hydrate"))]
/// `host` header value for `CONNECT`: the authority of the WebSocket origin.
pub(super) fn stomp_host(ws_origin: &str) -> String {
    let rest = ws_origin.split_once("://").map_or(ws_origin, |(_, rest)| rest);
    rest.split('/').next().unwrap_or(rest).to_owned()
}
