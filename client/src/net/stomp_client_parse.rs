//! Inbound STOMP `MESSAGE` classification for `stomp_client`.

#[cfg(test)]
#[path = "stomp_client_parse_test.rs"]
mod stomp_client_parse_test;

use frames::{CodecError, Frame};

use super::stomp_client_requests::{ROOM_LIST_TOPIC_PREFIX, ROOM_TOPIC_PREFIX};
use crate::net::types::{ChatMessage, ChatRoom, Id};

/// A decoded push from one of the chat subscriptions.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum InboundEvent {
    /// Room-list delta: a room in either wire shape.
    RoomDelta(ChatRoom),
    /// New message in a subscribed room.
    Message(ChatMessage),
}

/// Room id encoded in a `/sub/chat/room/{id}` destination.
pub(super) fn room_id_from_destination(destination: &str) -> Option<Id> {
    destination.strip_prefix(ROOM_TOPIC_PREFIX)?.parse().ok()
}

/// Classify a `MESSAGE` frame by destination. Unknown destinations yield `None`.
pub(super) fn parse_inbound(frame: &Frame) -> Result<Option<InboundEvent>, CodecError> {
    let Some(destination) = frame.destination() else {
        return Ok(None);
    };
    if destination.starts_with(ROOM_LIST_TOPIC_PREFIX) {
        return Ok(Some(InboundEvent::RoomDelta(frame.json_body()?)));
    }
    let Some(room_id) = room_id_from_destination(destination) else {
        return Ok(None);
    };
    let mut body: serde_json::Value = frame.json_body()?;
    if let Some(obj) = body.as_object_mut() {
        obj.entry("roomId").or_insert_with(|| room_id.into());
    }
    let message = serde_json::from_value(body)?;
    Ok(Some(InboundEvent::Message(message)))
}

/// Human-readable text of an `ERROR` frame.
pub(super) fn frame_error_message(frame: &Frame) -> String {
    match (frame.get("message"), frame.body.trim()) {
        (Some(message), "") => message.to_owned(),
        (Some(message), body) => format!("{message}: {body}"),
        (None, "") => "unknown STOMP error".to_owned(),
        (None, body) => body.to_owned(),
    }
}
