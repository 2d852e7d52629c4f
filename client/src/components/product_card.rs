//! Listing card linking to a product's detail page.

use leptos::prelude::*;

use crate::net::types::{ProductListItem, SaleStatus};
use crate::util::format::{format_price, sale_status_label};

#[component]
pub fn ProductCard(item: ProductListItem) -> impl IntoView {
    let href = format!("/products/{}", item.product_id);
    let badge = (item.sale_status != SaleStatus::OnSale).then(|| sale_status_label(item.sale_status));

    view! {
        <a class="product-card" href=href>
            <div class="product-card__thumb">
                {item
                    .thumbnail_url
                    .map(|src| view! { <img src=src alt=item.title.clone() loading="lazy"/> })}
                {badge.map(|label| view! { <span class="product-card__badge">{label}</span> })}
            </div>
            <p class="product-card__title">{item.title.clone()}</p>
            <p class="product-card__price">{format_price(item.price)}</p>
            <p class="product-card__meta">
                <span>"관심 " {item.wish_count}</span>
                <span>"채팅 " {item.chat_count}</span>
            </p>
        </a>
    }
}
