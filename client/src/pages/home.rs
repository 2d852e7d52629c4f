//! Home page: category filter and the paginated product listing.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the public landing route. The SSR route gate and the session
//! refresh path both send users here with a query marker (`login=required`,
//! `session=expired`), which is surfaced as a banner.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::product_card::ProductCard;
use crate::net::types::Id;
use crate::state::products::ProductListState;
use crate::util::alive::AliveFlag;

/// Banner text for the query markers set by redirects.
pub(crate) fn home_notice(login: Option<&str>, session: Option<&str>) -> Option<&'static str> {
    if session == Some("expired") {
        Some("세션이 만료되었어요. 다시 로그인해 주세요.")
    } else if login == Some("required") {
        Some("로그인이 필요한 페이지예요.")
    } else {
        None
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let products = RwSignal::new(ProductListState::default());
    let query = use_query_map();
    let alive = AliveFlag::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });
    let alive = StoredValue::new(alive);

    let notice = move || {
        query.with(|q| home_notice(q.get("login").as_deref(), q.get("session").as_deref()))
    };

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    #[cfg(feature = "hydrate")]
    {
        let client = api.get_value();
        let alive_task = alive.get_value();
        leptos::task::spawn_local(async move {
            match crate::net::api::list_categories(&client).await {
                Ok(categories) => {
                    alive_task.deliver(categories, |categories| products.update(|p| p.categories = categories));
                }
                Err(e) => leptos::logging::warn!("category fetch failed: {e}"),
            }
        });

        products.update(|p| p.select_category(None));
        fetch_page(api.get_value(), alive.get_value(), products, None, 0);
    }

    let select_category = move |category_id: Option<Id>| {
        if products.with_untracked(|p| p.category_id == category_id) {
            return;
        }
        products.update(|p| p.select_category(category_id));
        #[cfg(feature = "hydrate")]
        fetch_page(api.get_value(), alive.get_value(), products, category_id, 0);
    };

    let load_more = move |_| {
        let Some(next) = products.with_untracked(ProductListState::next_page) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let category_id = products.with_untracked(|p| p.category_id);
            fetch_page(api.get_value(), alive.get_value(), products, category_id, next);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = next;
    };

    view! {
        <div class="home-page">
            {move || notice().map(|text| view! { <p class="home-page__notice">{text}</p> })}

            <nav class="category-bar">
                <button
                    class="category-bar__item"
                    class:category-bar__item--active=move || products.with(|p| p.category_id.is_none())
                    on:click=move |_| select_category(None)
                >
                    "전체"
                </button>
                <For
                    each=move || products.with(|p| p.categories.clone())
                    key=|category| category.category_id
                    children=move |category| {
                        let id = category.category_id;
                        view! {
                            <button
                                class="category-bar__item"
                                class:category-bar__item--active=move || {
                                    products.with(|p| p.category_id == Some(id))
                                }
                                on:click=move |_| select_category(Some(id))
                            >
                                {category.name}
                            </button>
                        }
                    }
                />
            </nav>

            <Show when=move || products.with(|p| p.error.is_some())>
                <p class="home-page__error">{move || products.with(|p| p.error.clone().unwrap_or_default())}</p>
            </Show>

            <div class="product-grid">
                <For
                    each=move || products.with(|p| p.items.clone())
                    key=|item| item.product_id
                    children=|item| view! { <ProductCard item=item/> }
                />
            </div>

            <Show when=move || products.with(|p| !p.loading && p.error.is_none() && p.items.is_empty())>
                <p class="home-page__empty">"등록된 상품이 없어요."</p>
            </Show>
            <Show when=move || products.with(|p| p.loading)>
                <p class="home-page__loading">"불러오는 중..."</p>
            </Show>
            <Show when=move || products.with(|p| p.has_next && !p.loading)>
                <button class="btn home-page__more" on:click=load_more>
                    "더 보기"
                </button>
            </Show>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn fetch_page(
    client: crate::net::ApiClient,
    alive: AliveFlag,
    products: RwSignal<ProductListState>,
    category_id: Option<Id>,
    page: u32,
) {
    products.update(|p| p.loading = true);
    leptos::task::spawn_local(async move {
        let result = crate::net::api::list_products(&client, page, category_id).await;
        alive.deliver(result, |result| match result {
            Ok(items) => products.update(|p| p.apply_page(category_id, page, items)),
            Err(e) => {
                leptos::logging::warn!("product page {page} fetch failed: {e}");
                products.update(|p| p.fetch_failed(e.user_message()));
            }
        });
    });
}
