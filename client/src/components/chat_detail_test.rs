use super::*;

#[test]
fn reservation_time_appends_seconds() {
    assert_eq!(reservation_time("2025-03-04T15:30").as_deref(), Ok("2025-03-04T15:30:00"));
}

#[test]
fn reservation_time_rejects_blank_and_garbage() {
    assert_eq!(reservation_time(""), Err("예약 시간을 선택해 주세요."));
    assert_eq!(reservation_time("tomorrow"), Err("예약 시간을 선택해 주세요."));
}

#[test]
fn room_action_messages() {
    assert_eq!(RoomAction::Reserve.done_message(), "영상통화를 예약했어요.");
    assert_eq!(RoomAction::RequestDeposit.done_message(), "입금을 요청했어요.");
}
