//! Room-list preview text for the last message.
//!
//! System messages and images have fixed labels; everything else previews
//! the raw content, truncated.

#[cfg(test)]
#[path = "message_label_test.rs"]
mod message_label_test;

use crate::net::types::MessageKind;

/// Preview length in characters before "..." is appended.
pub const PREVIEW_CHARS: usize = 25;

/// Fixed label for image and system messages; `None` for text-like kinds.
pub fn fixed_label(kind: &MessageKind) -> Option<&'static str> {
    let label = match kind {
        MessageKind::Image => "이미지를 보냈어요",
        MessageKind::RoomCreated => "채팅방이 생성되었어요",
        MessageKind::VideoCallReserved => "영상통화가 예약되었어요",
        MessageKind::VideoCallCancelled => "영상통화 예약이 취소되었어요",
        MessageKind::VideoCallStarted => "영상통화가 시작되었어요",
        MessageKind::TradeStarted => "거래가 시작되었어요",
        MessageKind::DepositRequested => "입금을 요청했어요",
        MessageKind::DeliveryAddressInput => "배송지가 입력되었어요",
        MessageKind::DeliveryTrackingInput => "송장번호가 입력되었어요",
        MessageKind::DeliveryStarted => "배송이 시작되었어요",
        MessageKind::PurchaseConfirmRequested => "구매 확정을 요청했어요",
        MessageKind::TradeEnded => "거래가 종료되었어요",
        MessageKind::Text | MessageKind::Other(_) => return None,
    };
    Some(label)
}

/// Label shown for a room's last message.
pub fn last_message_label(kind: &MessageKind, content: &str) -> String {
    fixed_label(kind).map_or_else(|| truncate_preview(content), str::to_owned)
}

/// First [`PREVIEW_CHARS`] characters, plus "..." when longer.
pub fn truncate_preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() { format!("{head}...") } else { head }
}
