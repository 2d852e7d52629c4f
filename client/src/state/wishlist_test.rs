use super::*;

#[test]
fn begin_flips_and_counts_optimistically() {
    let mut state = WishState { wished: false, wish_count: 4, pending: false };
    let toggle = WishlistToggle::begin(&mut state).expect("toggle");
    assert!(toggle.target);
    assert!(state.wished);
    assert_eq!(state.wish_count, 5);
    assert!(state.pending);
}

#[test]
fn success_keeps_new_value() {
    let mut state = WishState { wished: true, wish_count: 1, pending: false };
    let toggle = WishlistToggle::begin(&mut state).expect("toggle");
    toggle.settle(&mut state, true);
    assert_eq!(state, WishState { wished: false, wish_count: 0, pending: false });
}

#[test]
fn failure_restores_snapshot() {
    let original = WishState { wished: false, wish_count: 9, pending: false };
    let mut state = original;
    let toggle = WishlistToggle::begin(&mut state).expect("toggle");
    toggle.settle(&mut state, false);
    assert_eq!(state, original);
}

#[test]
fn second_toggle_while_pending_is_rejected() {
    let mut state = WishState::default();
    let _first = WishlistToggle::begin(&mut state).expect("toggle");
    assert!(WishlistToggle::begin(&mut state).is_none());
}

#[test]
fn unwish_at_zero_count_saturates() {
    let mut state = WishState { wished: true, wish_count: 0, pending: false };
    WishlistToggle::begin(&mut state).expect("toggle");
    assert_eq!(state.wish_count, 0);
}
