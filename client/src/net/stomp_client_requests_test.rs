use frames::Command;

use super::*;
use crate::net::types::MessageKind;

#[test]
fn room_list_subscription_targets_user_topic() {
    let frame = room_list_subscribe_frame(42);
    assert_eq!(frame.command, Command::Subscribe);
    assert_eq!(frame.destination(), Some("/sub/chat/rooms/42"));
    assert_eq!(frame.get("id"), Some("rooms"));
}

#[test]
fn room_subscribe_and_unsubscribe_share_id() {
    let sub = room_subscribe_frame(7);
    let unsub = room_unsubscribe_frame(7);
    assert_eq!(sub.destination(), Some("/sub/chat/room/7"));
    assert_eq!(sub.get("id"), unsub.get("id"));
    assert_eq!(unsub.command, Command::Unsubscribe);
}

#[test]
fn chat_message_frame_posts_json_to_publish_destination() {
    let msg = OutgoingChatMessage { room_id: 3, content: "안녕".to_owned(), kind: MessageKind::Text };
    let frame = chat_message_frame(&msg).expect("frame");
    assert_eq!(frame.command, Command::Send);
    assert_eq!(frame.destination(), Some("/pub/chat/message"));
    let body: serde_json::Value = frame.json_body().expect("json");
    assert_eq!(body, serde_json::json!({ "roomId": 3, "content": "안녕", "messageType": "TEXT" }));
}

#[test]
fn stomp_host_strips_scheme_and_path() {
    assert_eq!(stomp_host("wss://api.market.example"), "api.market.example");
    assert_eq!(stomp_host("ws://localhost:8080/base"), "localhost:8080");
    assert_eq!(stomp_host("localhost"), "localhost");
}
