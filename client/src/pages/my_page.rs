//! My page: profile summary and the delivery address book.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::address_form::AddressFormView;
use crate::net::types::{Address, AddressRequest, Id};
use crate::state::addresses::{AddressBookState, AddressForm};
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::alive::AliveFlag;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn MyPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let book = RwSignal::new(AddressBookState { loading: true, ..AddressBookState::default() });
    let saving = RwSignal::new(false);
    install_unauth_redirect(auth, use_navigate());

    let alive = AliveFlag::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });
    let alive = StoredValue::new(alive);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    #[cfg(feature = "hydrate")]
    {
        let client = api.get_value();
        let alive = alive.get_value();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::list_addresses(&client).await;
            alive.deliver(result, |result| match result {
                Ok(list) => book.update(|b| b.replace(list)),
                Err(e) => {
                    leptos::logging::warn!("address fetch failed: {e}");
                    book.update(|b| {
                        b.loading = false;
                        b.error = Some(e.user_message());
                    });
                }
            });
        });
    }

    let on_save = Callback::new(move |request: AddressRequest| {
        let Some(target) = book.with_untracked(|b| b.editing) else {
            return;
        };
        saving.set(true);
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            let alive = alive.get_value();
            leptos::task::spawn_local(async move {
                let result = match target {
                    Some(id) => crate::net::api::update_address(&client, id, &request).await,
                    None => crate::net::api::create_address(&client, &request).await,
                };
                alive.deliver(result, |result| {
                    match result {
                        Ok(address) => book.update(|b| {
                            b.upsert(address);
                            b.editing = None;
                        }),
                        Err(e) => {
                            leptos::logging::warn!("address save failed: {e}");
                            toasts.update(|t| {
                                t.api_error(&e);
                            });
                        }
                    }
                    saving.set(false);
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (target, request, alive, toasts);
    });
    let on_cancel = Callback::new(move |()| book.update(|b| b.editing = None));

    let on_delete = move |address_id: Id| {
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            let alive = alive.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::delete_address(&client, address_id).await;
                alive.deliver(result, |result| match result {
                    Ok(()) => book.update(|b| b.remove(address_id)),
                    Err(e) => {
                        leptos::logging::warn!("address {address_id} delete failed: {e}");
                        toasts.update(|t| {
                            t.api_error(&e);
                        });
                    }
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = address_id;
    };

    let on_make_default = move |address_id: Id| {
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            let alive = alive.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::set_default_address(&client, address_id).await;
                alive.deliver(result, |result| match result {
                    Ok(()) => book.update(|b| b.set_default(address_id)),
                    Err(e) => {
                        leptos::logging::warn!("address {address_id} default failed: {e}");
                        toasts.update(|t| {
                            t.api_error(&e);
                        });
                    }
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = address_id;
    };

    let editing_form = move || {
        book.with(|b| {
            b.editing.map(|target| {
                target
                    .and_then(|id| b.addresses.iter().find(|a| a.address_id == id))
                    .map(AddressForm::from_address)
                    .unwrap_or_default()
            })
        })
    };

    view! {
        <div class="my-page">
            <section class="my-page__profile">
                {move || {
                    auth.with(|a| a.user.clone())
                        .map(|user| {
                            view! {
                                <h1>{user.nickname}</h1>
                                <p>{user.email.unwrap_or_default()}</p>
                            }
                        })
                }}
            </section>

            <section class="my-page__addresses">
                <header class="my-page__section-header">
                    <h2>"배송지 관리"</h2>
                    <button class="btn" on:click=move |_| book.update(|b| b.editing = Some(None))>
                        "새 배송지"
                    </button>
                </header>

                {move || {
                    editing_form()
                        .map(|initial| {
                            view! {
                                <AddressFormView
                                    initial=initial
                                    busy=saving.into()
                                    on_submit=on_save
                                    on_cancel=on_cancel
                                />
                            }
                        })
                }}

                <Show when=move || book.with(|b| b.error.is_some())>
                    <p class="my-page__error">{move || book.with(|b| b.error.clone().unwrap_or_default())}</p>
                </Show>
                <Show when=move || book.with(|b| !b.loading && b.error.is_none() && b.addresses.is_empty())>
                    <p class="my-page__empty">"등록된 배송지가 없어요."</p>
                </Show>

                <ul class="address-list">
                    <For
                        each=move || book.with(|b| b.addresses.clone())
                        key=|address| (address.address_id, address.default, address.road_address.clone())
                        children=move |address: Address| {
                            let id = address.address_id;
                            let is_default = address.default;
                            view! {
                                <li class="address-list__item" class:address-list__item--default=is_default>
                                    <p>
                                        <strong>{address.recipient_name.clone()}</strong>
                                        {is_default.then_some(view! { <span class="badge">"기본"</span> })}
                                    </p>
                                    <p>{address.phone_number.clone()}</p>
                                    <p>
                                        {format!(
                                            "({}) {} {}",
                                            address.zip_code,
                                            address.road_address,
                                            address.detail_address,
                                        )}
                                    </p>
                                    <div class="address-list__actions">
                                        <button class="btn" on:click=move |_| book.update(|b| b.editing = Some(Some(id)))>
                                            "수정"
                                        </button>
                                        <button class="btn" on:click=move |_| on_delete(id)>
                                            "삭제"
                                        </button>
                                        <Show when=move || !is_default>
                                            <button class="btn" on:click=move |_| on_make_default(id)>
                                                "기본으로"
                                            </button>
                                        </Show>
                                    </div>
                                </li>
                            }
                        }
                    />
                </ul>
            </section>
        </div>
    }
}
