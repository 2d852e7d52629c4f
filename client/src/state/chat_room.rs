//! Active chat room: message history, send box, and system-event modals.
//!
//! DESIGN
//! ======
//! Messages are kept sorted by timestamp descending (newest first) and
//! de-duplicated by id, since a pushed message may also appear in a history
//! fetch that raced it. System messages that ask the viewer to act push a
//! modal onto a stack; dismissing pops the top.

#[cfg(test)]
#[path = "chat_room_test.rs"]
mod chat_room_test;

use crate::net::types::{ChatMessage, Id, MessageKind};

/// Longest message the send box accepts, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// A transaction step the viewer is asked to complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemModal {
    /// Buyer: pay the deposit the seller requested.
    DepositRequest,
    /// Buyer: choose a delivery address.
    AddressInput,
    /// Seller: enter courier and tracking number.
    TrackingInput,
    /// Buyer: confirm the item arrived.
    PurchaseConfirm,
}

/// Which modal, if any, a system message opens for this viewer.
pub fn modal_for(kind: &MessageKind, is_seller: bool, delivery_available: bool) -> Option<SystemModal> {
    match (kind, is_seller) {
        (MessageKind::DepositRequested, false) => Some(SystemModal::DepositRequest),
        (MessageKind::TradeStarted, false) if delivery_available => Some(SystemModal::AddressInput),
        (MessageKind::DeliveryAddressInput, true) => Some(SystemModal::TrackingInput),
        (MessageKind::PurchaseConfirmRequested, false) => Some(SystemModal::PurchaseConfirm),
        _ => None,
    }
}

/// Validate send-box input. Returns the trimmed message.
///
/// # Errors
///
/// Returns a user-facing message for empty or oversized input.
pub fn validate_message(input: &str) -> Result<String, &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("메시지를 입력해 주세요.");
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err("메시지가 너무 길어요.");
    }
    Ok(trimmed.to_owned())
}

/// State for the room shown in the detail pane.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveRoomState {
    pub room_id: Option<Id>,
    /// Newest first.
    pub messages: Vec<ChatMessage>,
    pub loading: bool,
    pub error: Option<String>,
    pub modals: Vec<SystemModal>,
}

impl ActiveRoomState {
    /// Switch to `room_id`, dropping the previous room's data.
    pub fn open(&mut self, room_id: Id) {
        if self.room_id == Some(room_id) {
            return;
        }
        *self = Self { room_id: Some(room_id), loading: true, ..Self::default() };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Apply a history fetch for `room_id`. Ignored if the user moved on.
    pub fn load_history(&mut self, room_id: Id, history: Vec<ChatMessage>) {
        if self.room_id != Some(room_id) {
            return;
        }
        self.loading = false;
        self.error = None;
        for msg in history {
            self.insert(msg);
        }
    }

    pub fn history_failed(&mut self, room_id: Id, message: String) {
        if self.room_id == Some(room_id) {
            self.loading = false;
            self.error = Some(message);
        }
    }

    /// Apply a pushed message. Returns `true` when it was added.
    ///
    /// System messages open the matching modal for this viewer.
    pub fn push_message(&mut self, msg: ChatMessage, is_seller: bool, delivery_available: bool) -> bool {
        if self.room_id != Some(msg.room_id) {
            return false;
        }
        let modal = modal_for(&msg.kind, is_seller, delivery_available);
        if !self.insert(msg) {
            return false;
        }
        if let Some(modal) = modal {
            self.modals.push(modal);
        }
        true
    }

    /// Topmost pending modal.
    pub fn top_modal(&self) -> Option<SystemModal> {
        self.modals.last().copied()
    }

    pub fn dismiss_modal(&mut self) {
        self.modals.pop();
    }

    fn insert(&mut self, msg: ChatMessage) -> bool {
        if msg.message_id.is_some()
            && self.messages.iter().any(|m| m.message_id == msg.message_id)
        {
            return false;
        }
        let ts = msg.timestamp_ms().unwrap_or(i64::MIN);
        let at = self
            .messages
            .iter()
            .position(|m| m.timestamp_ms().unwrap_or(i64::MIN) < ts)
            .unwrap_or(self.messages.len());
        self.messages.insert(at, msg);
        true
    }
}
