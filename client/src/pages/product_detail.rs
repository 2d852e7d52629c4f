//! Product detail page with the wishlist heart and the "start chat" action.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::wishlist_button::WishlistButton;
use crate::net::types::{Id, ProductDetail, SaleStatus};
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::state::wishlist::WishState;
use crate::util::alive::AliveFlag;
use crate::util::auth::LOGIN_REQUIRED_PATH;
use crate::util::format::{format_price, sale_status_label};

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let params = use_params_map();
    let navigate = use_navigate();
    let product = RwSignal::new(None::<ProductDetail>);
    let error = RwSignal::new(None::<String>);
    let starting_chat = RwSignal::new(false);
    let redirect_to = RwSignal::new(None::<String>);
    let alive = AliveFlag::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });
    let alive = StoredValue::new(alive);

    let product_id = Memo::new(move |_| params.with(|p| p.get("id").and_then(|raw| raw.parse::<Id>().ok())));

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    Effect::new(move || {
        let Some(id) = product_id.get() else {
            error.set(Some("상품을 찾을 수 없어요.".to_owned()));
            return;
        };
        product.set(None);
        error.set(None);
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            let alive = alive.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::get_product(&client, id).await;
                alive.deliver(result, |result| match result {
                    Ok(detail) => product.set(Some(detail)),
                    Err(e) => {
                        leptos::logging::warn!("product {id} fetch failed: {e}");
                        error.set(Some(e.user_message()));
                    }
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, alive);
    });

    Effect::new(move || {
        if let Some(path) = redirect_to.get() {
            redirect_to.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });

    let is_own_product = move || {
        let me = auth.with(AuthState::user_id);
        product.with(|p| p.as_ref().is_some_and(|p| Some(p.seller.user_id) == me))
    };

    let sold_out = move || product.with(|p| p.as_ref().is_some_and(|p| p.sale_status == SaleStatus::SoldOut));

    let on_start_chat = move |_| {
        if starting_chat.get_untracked() {
            return;
        }
        if auth.with_untracked(|a| a.user.is_none()) {
            redirect_to.set(Some(LOGIN_REQUIRED_PATH.to_owned()));
            return;
        }
        let Some(id) = product_id.get_untracked() else {
            return;
        };
        starting_chat.set(true);

        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            let alive = alive.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::create_room(&client, id).await;
                alive.deliver(result, |result| match result {
                    Ok(room) => redirect_to.set(Some(format!("/chat/{}", room.room_id))),
                    Err(e) => {
                        leptos::logging::warn!("opening chat for product {id} failed: {e}");
                        toasts.update(|t| {
                            t.api_error(&e);
                        });
                        starting_chat.set(false);
                    }
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, toasts);
    };

    view! {
        <div class="product-detail">
            <Show when=move || error.with(Option::is_some)>
                <p class="product-detail__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                product
                    .get()
                    .map(|detail| {
                        let wish = WishState { wished: detail.wished, wish_count: detail.wish_count, pending: false };
                        view! {
                            <div class="product-detail__gallery">
                                {detail
                                    .image_urls
                                    .iter()
                                    .map(|src| view! { <img src=src.clone() alt=detail.title.clone()/> })
                                    .collect_view()}
                            </div>
                            <div class="product-detail__body">
                                <p class="product-detail__seller">{detail.seller.nickname.clone()}</p>
                                <h1 class="product-detail__title">{detail.title.clone()}</h1>
                                <p class="product-detail__meta">
                                    {detail.category.as_ref().map(|c| c.name.clone())}
                                    " · "
                                    {sale_status_label(detail.sale_status)}
                                </p>
                                <p class="product-detail__price">{format_price(detail.price)}</p>
                                <ul class="product-detail__options">
                                    {detail.video_call_available.then_some(view! { <li>"영상통화 가능"</li> })}
                                    {detail.delivery_available.then_some(view! { <li>"택배 거래"</li> })}
                                    {detail.direct_trade_available.then_some(view! { <li>"직거래"</li> })}
                                </ul>
                                <p class="product-detail__description">{detail.description.clone()}</p>
                                <WishlistButton product_id=detail.product_id initial=wish/>
                            </div>
                        }
                    })
            }}
            <Show when=move || product.with(Option::is_some)>
                <button
                    class="btn btn--primary product-detail__chat"
                    disabled=move || sold_out() || is_own_product() || starting_chat.get()
                    on:click=on_start_chat
                >
                    "채팅하기"
                </button>
            </Show>
            <Show when=move || product.with(Option::is_none) && error.with(Option::is_none)>
                <p class="product-detail__loading">"불러오는 중..."</p>
            </Show>
        </div>
    }
}
