//! Wishlist heart with optimistic toggle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The heart flips before the request resolves. A failed request restores
//! the pre-click snapshot and raises a toast.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Id;
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::state::wishlist::{WishState, WishlistToggle};
use crate::util::alive::AliveFlag;
use crate::util::auth::LOGIN_REQUIRED_PATH;

#[component]
pub fn WishlistButton(product_id: Id, initial: WishState) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let wish = RwSignal::new(initial);
    let login_redirect = RwSignal::new(false);
    let alive = AliveFlag::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });
    let alive = StoredValue::new(alive);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    Effect::new(move || {
        if login_redirect.get() {
            navigate(LOGIN_REQUIRED_PATH, NavigateOptions::default());
        }
    });

    let on_click = move |_| {
        if auth.with_untracked(|a| a.user.is_none()) {
            login_redirect.set(true);
            return;
        }
        let mut toggle = None;
        wish.update(|w| toggle = WishlistToggle::begin(w));
        let Some(toggle) = toggle else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            let alive = alive.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::set_wished(&client, product_id, toggle.target).await;
                alive.deliver(result, |result| {
                    if let Err(e) = &result {
                        leptos::logging::warn!("wishlist toggle for {product_id} failed: {e}");
                        toasts.update(|t| {
                            t.api_error(e);
                        });
                    }
                    wish.update(|w| toggle.settle(w, result.is_ok()));
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (alive, toasts);
            wish.update(|w| toggle.settle(w, false));
        }
    };

    view! {
        <button
            class="wish-button"
            class:wish-button--on=move || wish.with(|w| w.wished)
            disabled=move || wish.with(|w| w.pending)
            on:click=on_click
            aria-label="관심 상품"
        >
            <span class="wish-button__heart">{move || if wish.with(|w| w.wished) { "♥" } else { "♡" }}</span>
            <span class="wish-button__count">{move || wish.with(|w| w.wish_count)}</span>
        </button>
    }
}
