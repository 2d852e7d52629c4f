//! Single-flight access-token refresh.
//!
//! DESIGN
//! ======
//! Several requests can hit a 401 at once when the access token expires.
//! The first caller starts the reissue call; every caller that arrives while
//! it is pending awaits the same shared future and receives the same token.
//! A generation number keeps a finished refresh from clearing a newer one.

#[cfg(test)]
#[path = "refresh_test.rs"]
mod refresh_test;

use std::cell::{Cell, RefCell};
use std::future::Future;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use super::http::ApiError;

type SharedRefresh = Shared<LocalBoxFuture<'static, Result<String, ApiError>>>;

/// Serializes concurrent token refreshes behind one in-flight call.
#[derive(Default)]
pub struct RefreshGate {
    inflight: RefCell<Option<(u64, SharedRefresh)>>,
    generation: Cell<u64>,
}

impl RefreshGate {
    /// Await the in-flight refresh, starting one with `start` if none is pending.
    ///
    /// # Errors
    ///
    /// Returns whatever error the shared refresh resolved with.
    pub async fn run<F, Fut>(&self, start: F) -> Result<String, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ApiError>> + 'static,
    {
        let (generation, shared) = {
            let mut slot = self.inflight.borrow_mut();
            if let Some((generation, pending)) = slot.as_ref() {
                (*generation, pending.clone())
            } else {
                let generation = self.generation.get() + 1;
                self.generation.set(generation);
                let pending = start().boxed_local().shared();
                *slot = Some((generation, pending.clone()));
                (generation, pending)
            }
        };

        let result = shared.await;

        let mut slot = self.inflight.borrow_mut();
        if slot.as_ref().is_some_and(|(g, _)| *g == generation) {
            *slot = None;
        }
        result
    }

    /// True while a refresh is pending.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.inflight.borrow().is_some()
    }
}
