use super::*;

#[test]
fn room_id_from_path_reads_numeric_segment() {
    assert_eq!(room_id_from_path("/chat/12"), Some(12));
    assert_eq!(room_id_from_path("/chat/12/"), Some(12));
}

#[test]
fn room_id_from_path_is_none_without_room() {
    assert_eq!(room_id_from_path("/chat"), None);
    assert_eq!(room_id_from_path("/chat/"), None);
}

#[test]
fn room_id_from_path_rejects_malformed_paths() {
    assert_eq!(room_id_from_path("/chat/abc"), None);
    assert_eq!(room_id_from_path("/chat/12/extra"), None);
    assert_eq!(room_id_from_path("/chatroom/12"), None);
    assert_eq!(room_id_from_path("/mypage"), None);
}
