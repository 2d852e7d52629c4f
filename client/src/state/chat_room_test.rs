use super::*;

fn msg(id: Id, at: &str, kind: MessageKind) -> ChatMessage {
    ChatMessage {
        message_id: Some(id),
        room_id: 1,
        content: format!("m{id}"),
        created_at: at.to_owned(),
        sender_id: 2,
        receiver_id: Some(1),
        kind,
    }
}

fn ids(state: &ActiveRoomState) -> Vec<Id> {
    state.messages.iter().filter_map(|m| m.message_id).collect()
}

// =============================================================
// History & ordering
// =============================================================

#[test]
fn history_is_sorted_newest_first() {
    let mut state = ActiveRoomState::default();
    state.open(1);
    state.load_history(
        1,
        vec![
            msg(1, "2025-01-01T00:00:00", MessageKind::Text),
            msg(3, "2025-01-03T00:00:00", MessageKind::Text),
            msg(2, "2025-01-02T00:00:00", MessageKind::Text),
        ],
    );
    assert_eq!(ids(&state), vec![3, 2, 1]);
    assert!(!state.loading);
}

#[test]
fn history_for_other_room_is_ignored() {
    let mut state = ActiveRoomState::default();
    state.open(2);
    state.load_history(1, vec![msg(1, "2025-01-01T00:00:00", MessageKind::Text)]);
    assert!(state.messages.is_empty());
    assert!(state.loading);
}

#[test]
fn pushed_message_is_deduplicated_against_history() {
    let mut state = ActiveRoomState::default();
    state.open(1);
    assert!(state.push_message(msg(5, "2025-01-05T00:00:00", MessageKind::Text), false, true));
    state.load_history(1, vec![msg(5, "2025-01-05T00:00:00", MessageKind::Text), msg(4, "2025-01-04T00:00:00", MessageKind::Text)]);
    assert_eq!(ids(&state), vec![5, 4]);
    assert!(!state.push_message(msg(4, "2025-01-04T00:00:00", MessageKind::Text), false, true));
}

#[test]
fn open_same_room_keeps_messages() {
    let mut state = ActiveRoomState::default();
    state.open(1);
    state.load_history(1, vec![msg(1, "2025-01-01T00:00:00", MessageKind::Text)]);
    state.open(1);
    assert_eq!(state.messages.len(), 1);
    state.open(2);
    assert!(state.messages.is_empty());
    assert_eq!(state.room_id, Some(2));
}

// =============================================================
// Modals
// =============================================================

#[test]
fn modal_for_routes_steps_to_the_acting_party() {
    assert_eq!(modal_for(&MessageKind::DepositRequested, false, true), Some(SystemModal::DepositRequest));
    assert_eq!(modal_for(&MessageKind::DepositRequested, true, true), None);
    assert_eq!(modal_for(&MessageKind::TradeStarted, false, true), Some(SystemModal::AddressInput));
    assert_eq!(modal_for(&MessageKind::TradeStarted, false, false), None);
    assert_eq!(modal_for(&MessageKind::DeliveryAddressInput, true, true), Some(SystemModal::TrackingInput));
    assert_eq!(modal_for(&MessageKind::PurchaseConfirmRequested, false, true), Some(SystemModal::PurchaseConfirm));
    assert_eq!(modal_for(&MessageKind::Text, false, true), None);
}

#[test]
fn system_messages_stack_modals_and_dismiss_pops_top() {
    let mut state = ActiveRoomState::default();
    state.open(1);
    state.push_message(msg(1, "2025-01-01T00:00:00", MessageKind::DepositRequested), false, true);
    state.push_message(msg(2, "2025-01-02T00:00:00", MessageKind::PurchaseConfirmRequested), false, true);
    assert_eq!(state.top_modal(), Some(SystemModal::PurchaseConfirm));
    state.dismiss_modal();
    assert_eq!(state.top_modal(), Some(SystemModal::DepositRequest));
    state.dismiss_modal();
    assert_eq!(state.top_modal(), None);
}

#[test]
fn history_does_not_open_modals() {
    let mut state = ActiveRoomState::default();
    state.open(1);
    state.load_history(1, vec![msg(1, "2025-01-01T00:00:00", MessageKind::DepositRequested)]);
    assert!(state.modals.is_empty());
}

// =============================================================
// Send box
// =============================================================

#[test]
fn validate_message_rejects_blank_and_trims() {
    assert!(validate_message("   ").is_err());
    assert_eq!(validate_message("  안녕하세요 ").as_deref(), Ok("안녕하세요"));
}

#[test]
fn validate_message_rejects_oversized_input() {
    let long = "가".repeat(MAX_MESSAGE_CHARS + 1);
    assert!(validate_message(&long).is_err());
    let max = "가".repeat(MAX_MESSAGE_CHARS);
    assert!(validate_message(&max).is_ok());
}
