use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.error("a");
    let b = state.push(ToastKind::Info, "b");
    assert!(b > a);
    assert_eq!(state.toasts.len(), 2);
}

#[test]
fn overflow_drops_oldest() {
    let mut state = ToastState::default();
    for i in 0..5 {
        state.error(format!("t{i}"));
    }
    let messages: Vec<&str> = state.toasts.iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages, vec!["t2", "t3", "t4"]);
}

#[test]
fn dismiss_removes_by_id() {
    let mut state = ToastState::default();
    let id = state.error("x");
    state.error("y");
    state.dismiss(id);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].message, "y");
}

#[test]
fn api_error_uses_backend_message() {
    let mut state = ToastState::default();
    state.api_error(&ApiError::Status { status: 409, message: "이미 예약된 상품이에요".to_owned() });
    assert_eq!(state.toasts[0].message, "이미 예약된 상품이에요");
    assert_eq!(state.toasts[0].kind, ToastKind::Error);
}
