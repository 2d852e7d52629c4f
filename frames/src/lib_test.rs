use super::*;

fn message_frame() -> Frame {
    Frame::new(Command::Message)
        .header("destination", "/sub/chat/room/7")
        .header("subscription", "sub-1")
        .header("message-id", "m-1")
        .body(r#"{"roomId":7,"content":"hi"}"#)
}

#[test]
fn command_spelling_matches_wire() {
    assert_eq!(Command::Connect.as_str(), "CONNECT");
    assert_eq!(Command::Message.as_str(), "MESSAGE");
    assert_eq!(Command::parse("RECEIPT").expect("command"), Command::Receipt);
}

#[test]
fn unknown_command_is_rejected() {
    let err = decode_frame("PING\n\n\0").expect_err("command should fail");
    assert!(matches!(err, CodecError::UnknownCommand(ref c) if c == "PING"));
}

#[test]
fn encode_appends_content_length_and_nul() {
    let text = encode_frame(&message_frame());
    assert!(text.starts_with("MESSAGE\n"));
    assert!(text.contains("content-length:27\n"));
    assert!(text.ends_with("\"hi\"}\0"));
}

#[test]
fn encode_then_decode_preserves_frame_contents() {
    let frame = message_frame();
    let decoded = decode_frame(&encode_frame(&frame))
        .expect("decode")
        .expect("frame");
    assert_eq!(decoded.command, Command::Message);
    assert_eq!(decoded.destination(), Some("/sub/chat/room/7"));
    assert_eq!(decoded.get("message-id"), Some("m-1"));
    assert_eq!(decoded.body, frame.body);
}

#[test]
fn header_values_are_escaped_outside_connect() {
    let frame = Frame::new(Command::Send).header("note", "a:b\nc\\d");
    let text = encode_frame(&frame);
    assert!(text.contains("note:a\\cb\\nc\\\\d\n"));

    let decoded = decode_frame(&text).expect("decode").expect("frame");
    assert_eq!(decoded.get("note"), Some("a:b\nc\\d"));
}

#[test]
fn connect_headers_are_not_escaped() {
    let frame = connect_frame("localhost:8080", Some("tok"));
    let text = encode_frame(&frame);
    assert!(text.contains("host:localhost:8080\n"));
    assert!(text.contains("Authorization:Bearer tok\n"));
}

#[test]
fn connect_frame_without_token_has_no_authorization() {
    let frame = connect_frame("h", None);
    assert!(frame.get("Authorization").is_none());
    assert_eq!(frame.get("accept-version"), Some("1.2"));
}

#[test]
fn invalid_escape_is_rejected() {
    let err = decode_frame("MESSAGE\nk:bad\\t\n\n\0").expect_err("escape should fail");
    assert!(matches!(err, CodecError::InvalidEscape(_)));
}

#[test]
fn first_repeated_header_wins() {
    let decoded = decode_frame("MESSAGE\nfoo:1\nfoo:2\n\n\0")
        .expect("decode")
        .expect("frame");
    assert_eq!(decoded.get("foo"), Some("1"));
    assert_eq!(decoded.headers.len(), 2);
}

#[test]
fn heartbeat_only_message_decodes_to_none() {
    assert!(decode_frame("\n").expect("decode").is_none());
    assert!(decode_frame("\r\n\r\n").expect("decode").is_none());
}

#[test]
fn leading_heartbeats_are_skipped() {
    let decoded = decode_frame("\n\nCONNECTED\nversion:1.2\n\n\0")
        .expect("decode")
        .expect("frame");
    assert_eq!(decoded.command, Command::Connected);
    assert_eq!(decoded.get("version"), Some("1.2"));
}

#[test]
fn crlf_line_endings_are_accepted() {
    let decoded = decode_frame("RECEIPT\r\nreceipt-id:r-1\r\n\r\n\0")
        .expect("decode")
        .expect("frame");
    assert_eq!(decoded.command, Command::Receipt);
    assert_eq!(decoded.get("receipt-id"), Some("r-1"));
}

#[test]
fn crlf_frame_body_may_contain_blank_lines() {
    let decoded = decode_frame("MESSAGE\r\ndestination:/sub/chat/room/1\r\n\r\nfirst\n\nsecond\0")
        .expect("decode")
        .expect("frame");
    assert_eq!(decoded.get("destination"), Some("/sub/chat/room/1"));
    assert_eq!(decoded.body, "first\n\nsecond");
}

#[test]
fn mixed_line_endings_split_at_first_blank_line() {
    let decoded = decode_frame("MESSAGE\nsubscription:0\r\n\nbody\r\n\r\ntail\0")
        .expect("decode")
        .expect("frame");
    assert_eq!(decoded.get("subscription"), Some("0"));
    assert_eq!(decoded.body, "body\r\n\r\ntail");
}

#[test]
fn content_length_allows_nul_inside_body() {
    let decoded = decode_frame("MESSAGE\ncontent-length:3\n\na\0b\0")
        .expect("decode")
        .expect("frame");
    assert_eq!(decoded.body, "a\0b");
}

#[test]
fn content_length_counts_utf8_bytes() {
    let body = "안녕";
    let text = format!("MESSAGE\ncontent-length:{}\n\n{body}\0", body.len());
    let decoded = decode_frame(&text).expect("decode").expect("frame");
    assert_eq!(decoded.body, body);
}

#[test]
fn content_length_past_end_is_missing_terminator() {
    let err = decode_frame("MESSAGE\ncontent-length:10\n\nabc\0").expect_err("length should fail");
    assert!(matches!(err, CodecError::MissingTerminator));
}

#[test]
fn non_numeric_content_length_is_rejected() {
    let err = decode_frame("MESSAGE\ncontent-length:abc\n\n\0").expect_err("length should fail");
    assert!(matches!(err, CodecError::InvalidContentLength(_)));
}

#[test]
fn missing_nul_is_rejected() {
    let err = decode_frame("MESSAGE\n\nbody").expect_err("terminator should fail");
    assert!(matches!(err, CodecError::MissingTerminator));
}

#[test]
fn malformed_header_is_rejected() {
    let err = decode_frame("MESSAGE\nnocolon\n\n\0").expect_err("header should fail");
    assert!(matches!(err, CodecError::MalformedHeader(ref h) if h == "nocolon"));
}

#[test]
fn send_json_frame_sets_destination_and_body() {
    let frame = send_json_frame("/pub/chat/message", &serde_json::json!({ "roomId": 3 })).expect("frame");
    assert_eq!(frame.command, Command::Send);
    assert_eq!(frame.destination(), Some("/pub/chat/message"));
    assert_eq!(frame.get("content-type"), Some("application/json"));
    assert_eq!(frame.body, r#"{"roomId":3}"#);
}

#[test]
fn json_body_parses_payload() {
    #[derive(serde::Deserialize)]
    struct Payload {
        #[serde(rename = "roomId")]
        room_id: i64,
    }
    let payload: Payload = message_frame().json_body().expect("json");
    assert_eq!(payload.room_id, 7);
}

#[test]
fn subscribe_and_unsubscribe_frames_carry_id() {
    let sub = subscribe_frame("sub-9", "/sub/chat/rooms/1");
    assert_eq!(sub.get("id"), Some("sub-9"));
    assert_eq!(sub.destination(), Some("/sub/chat/rooms/1"));
    assert_eq!(unsubscribe_frame("sub-9").get("id"), Some("sub-9"));
    assert_eq!(disconnect_frame("r-1").get("receipt"), Some("r-1"));
}
