use frames::Command;

use super::*;
use crate::net::types::MessageKind;

fn message_frame(destination: &str, body: &str) -> Frame {
    Frame::new(Command::Message)
        .header("destination", destination)
        .header("subscription", "sub-0")
        .body(body)
}

#[test]
fn room_destination_yields_message_event() {
    let frame = message_frame(
        "/sub/chat/room/5",
        r#"{"roomId":5,"content":"hi","createdAt":"2025-01-01T00:00:00","senderId":2,"messageType":"DEPOSIT_REQUESTED"}"#,
    );
    let Some(InboundEvent::Message(msg)) = parse_inbound(&frame).expect("parse") else {
        panic!("expected message event");
    };
    assert_eq!(msg.room_id, 5);
    assert_eq!(msg.kind, MessageKind::DepositRequested);
}

#[test]
fn missing_room_id_is_taken_from_destination() {
    let frame = message_frame("/sub/chat/room/12", r#"{"content":"x","createdAt":"2025-01-01T00:00:00","senderId":1}"#);
    let Some(InboundEvent::Message(msg)) = parse_inbound(&frame).expect("parse") else {
        panic!("expected message event");
    };
    assert_eq!(msg.room_id, 12);
}

#[test]
fn room_list_destination_yields_room_delta_in_flat_shape() {
    let frame = message_frame(
        "/sub/chat/rooms/2",
        r#"{"chatRoomId":9,"buyerId":1,"sellerId":2,"productId":3,"unreadCount":1}"#,
    );
    let Some(InboundEvent::RoomDelta(room)) = parse_inbound(&frame).expect("parse") else {
        panic!("expected room delta");
    };
    assert_eq!(room.room_id, 9);
    assert_eq!(room.unread_count, 1);
}

#[test]
fn unknown_destination_is_ignored() {
    let frame = message_frame("/sub/notifications/1", "{}");
    assert_eq!(parse_inbound(&frame).expect("parse"), None);
    let frame = Frame::new(Command::Message).body("{}");
    assert_eq!(parse_inbound(&frame).expect("parse"), None);
}

#[test]
fn malformed_body_is_an_error() {
    let frame = message_frame("/sub/chat/room/1", "not json");
    assert!(parse_inbound(&frame).is_err());
}

#[test]
fn room_id_parsing_rejects_list_topic() {
    assert_eq!(room_id_from_destination("/sub/chat/room/77"), Some(77));
    assert_eq!(room_id_from_destination("/sub/chat/rooms/77"), None);
    assert_eq!(room_id_from_destination("/sub/chat/room/abc"), None);
}

#[test]
fn error_message_combines_header_and_body() {
    let frame = Frame::new(Command::Error).header("message", "Unauthorized").body("token expired");
    assert_eq!(frame_error_message(&frame), "Unauthorized: token expired");
    assert_eq!(frame_error_message(&Frame::new(Command::Error)), "unknown STOMP error");
}
