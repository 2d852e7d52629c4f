//! Optimistic wishlist heart.
//!
//! The heart flips immediately; the request settles it. A failed request
//! restores the snapshot taken before the flip.

#[cfg(test)]
#[path = "wishlist_test.rs"]
mod wishlist_test;

/// Wishlist flag and count for one product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WishState {
    pub wished: bool,
    pub wish_count: u32,
    pub pending: bool,
}

/// An in-flight toggle holding the pre-toggle snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WishlistToggle {
    snapshot: WishState,
    /// The value the request should set.
    pub target: bool,
}

impl WishlistToggle {
    /// Flip `state` optimistically. `None` while another toggle is pending.
    pub fn begin(state: &mut WishState) -> Option<Self> {
        if state.pending {
            return None;
        }
        let snapshot = *state;
        let target = !state.wished;
        state.wished = target;
        state.wish_count = if target {
            state.wish_count.saturating_add(1)
        } else {
            state.wish_count.saturating_sub(1)
        };
        state.pending = true;
        Some(Self { snapshot, target })
    }

    /// Finish the toggle; on failure the snapshot is restored.
    pub fn settle(self, state: &mut WishState, succeeded: bool) {
        if succeeded {
            state.pending = false;
        } else {
            *state = self.snapshot;
        }
    }
}
