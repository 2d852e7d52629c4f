//! Cancellation flag for view-scoped async work.
//!
//! SYSTEM CONTEXT
//! ==============
//! A view creates one flag, hands clones to the tasks it spawns, and cancels
//! it from `on_cleanup`. Tasks check the flag before writing results so a
//! response resolving after unmount is dropped.

#[cfg(test)]
#[path = "alive_test.rs"]
mod alive_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct AliveFlag(Arc<AtomicBool>);

impl AliveFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Run `apply` with `value` only while the owner is still mounted.
    pub fn deliver<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_alive() {
            apply(value);
            true
        } else {
            false
        }
    }
}

impl Default for AliveFlag {
    fn default() -> Self {
        Self::new()
    }
}
