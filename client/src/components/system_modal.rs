//! Modal stack for transaction-lifecycle system messages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ActiveRoomState` pushes a `SystemModal` when a system message asks this
//! viewer to act. The host renders the topmost one; completing the action or
//! closing the modal pops it.

#[cfg(test)]
#[path = "system_modal_test.rs"]
mod system_modal_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::net::types::{Address, Id};
use crate::state::chat_room::{ActiveRoomState, SystemModal};
use crate::state::toast::ToastState;

/// Couriers offered in the tracking form.
pub(crate) const COURIERS: [&str; 5] = ["CJ대한통운", "우체국택배", "한진택배", "롯데택배", "로젠택배"];

/// Validate the tracking form. Returns the courier and the digits-only number.
pub(crate) fn validate_tracking(courier: &str, number: &str) -> Result<(String, String), &'static str> {
    let courier = courier.trim();
    if courier.is_empty() {
        return Err("택배사를 선택해 주세요.");
    }
    let digits: String = number.chars().filter(|c| !matches!(c, '-' | ' ')).collect();
    if digits.is_empty() {
        return Err("송장번호를 입력해 주세요.");
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) || !(8..=20).contains(&digits.len()) {
        return Err("송장번호를 확인해 주세요.");
    }
    Ok((courier.to_owned(), digits))
}

/// Renders the topmost pending modal for the open room.
#[component]
pub fn SystemModalHost() -> impl IntoView {
    let active = expect_context::<RwSignal<ActiveRoomState>>();

    let top = Memo::new(move |_| active.with(|a| a.room_id.zip(a.top_modal())));
    let close = Callback::new(move |()| active.update(ActiveRoomState::dismiss_modal));

    move || {
        top.get().map(|(room_id, modal)| {
            let body = match modal {
                SystemModal::DepositRequest => view! { <DepositRequestModal on_close=close/> }.into_any(),
                SystemModal::AddressInput => view! { <AddressInputModal room_id=room_id on_close=close/> }.into_any(),
                SystemModal::TrackingInput => view! { <TrackingInputModal room_id=room_id on_close=close/> }.into_any(),
                SystemModal::PurchaseConfirm => {
                    view! { <PurchaseConfirmModal room_id=room_id on_close=close/> }.into_any()
                }
            };
            view! {
                <div class="modal-backdrop">
                    <div class="modal">{body}</div>
                </div>
            }
        })
    }
}

#[component]
fn DepositRequestModal(on_close: Callback<()>) -> impl IntoView {
    view! {
        <h2 class="modal__title">"판매자가 입금을 요청했어요"</h2>
        <p class="modal__body">"안내된 계좌로 예약금을 입금한 뒤 판매자에게 알려 주세요."</p>
        <div class="modal__actions">
            <button class="btn btn--primary" on:click=move |_| on_close.run(())>
                "확인"
            </button>
        </div>
    }
}

#[component]
fn AddressInputModal(room_id: Id, on_close: Callback<()>) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let addresses = RwSignal::new(Vec::<Address>::new());
    let chosen = RwSignal::new(None::<Id>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    #[cfg(feature = "hydrate")]
    {
        let client = api.get_value();
        leptos::task::spawn_local(async move {
            match crate::net::api::list_addresses(&client).await {
                Ok(list) => {
                    chosen.set(list.iter().find(|a| a.default).map(|a| a.address_id));
                    addresses.set(list);
                }
                Err(e) => {
                    leptos::logging::warn!("address fetch failed: {e}");
                    toasts.update(|t| {
                        t.api_error(&e);
                    });
                }
            }
        });
    }

    let on_submit = move |_| {
        let Some(address_id) = chosen.get_untracked() else {
            toasts.update(|t| {
                t.error("배송지를 선택해 주세요.");
            });
            return;
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            leptos::task::spawn_local(async move {
                match crate::net::api::submit_delivery_address(&client, room_id, address_id).await {
                    Ok(()) => on_close.run(()),
                    Err(e) => {
                        leptos::logging::warn!("delivery address for room {room_id} failed: {e}");
                        toasts.update(|t| {
                            t.api_error(&e);
                        });
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (room_id, address_id);
    };

    view! {
        <h2 class="modal__title">"배송지를 선택해 주세요"</h2>
        <Show when=move || addresses.with(Vec::is_empty)>
            <p class="modal__body">
                "등록된 배송지가 없어요. " <a href="/mypage">"마이페이지"</a> "에서 먼저 추가해 주세요."
            </p>
        </Show>
        <ul class="modal__choices">
            <For
                each=move || addresses.get()
                key=|address| address.address_id
                children=move |address| {
                    let id = address.address_id;
                    view! {
                        <li>
                            <label>
                                <input
                                    type="radio"
                                    name="delivery-address"
                                    prop:checked=move || chosen.get() == Some(id)
                                    on:change=move |_| chosen.set(Some(id))
                                />
                                <span>{address.recipient_name.clone()}</span>
                                <span>{format!("{} {}", address.road_address, address.detail_address)}</span>
                            </label>
                        </li>
                    }
                }
            />
        </ul>
        <div class="modal__actions">
            <button class="btn" on:click=move |_| on_close.run(())>
                "나중에"
            </button>
            <button class="btn btn--primary" disabled=move || busy.get() on:click=on_submit>
                "배송지 전달"
            </button>
        </div>
    }
}

#[component]
fn TrackingInputModal(room_id: Id, on_close: Callback<()>) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let courier = RwSignal::new(COURIERS[0].to_owned());
    let number = RwSignal::new(String::new());
    let error = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (courier_value, number_value) = match validate_tracking(&courier.get_untracked(), &number.get_untracked()) {
            Ok(valid) => valid,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        error.set(None);
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            leptos::task::spawn_local(async move {
                match crate::net::api::submit_tracking(&client, room_id, &courier_value, &number_value).await {
                    Ok(()) => on_close.run(()),
                    Err(e) => {
                        leptos::logging::warn!("tracking for room {room_id} failed: {e}");
                        toasts.update(|t| {
                            t.api_error(&e);
                        });
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (room_id, courier_value, number_value, toasts);
    };

    view! {
        <h2 class="modal__title">"송장번호를 입력해 주세요"</h2>
        <form class="modal__form" on:submit=on_submit>
            <select on:change=move |ev| courier.set(event_target_value(&ev)) prop:value=move || courier.get()>
                {COURIERS.iter().map(|name| view! { <option value=*name>{*name}</option> }).collect_view()}
            </select>
            <input
                type="text"
                inputmode="numeric"
                placeholder="송장번호"
                prop:value=move || number.get()
                on:input=move |ev| number.set(event_target_value(&ev))
            />
            {move || error.get().map(|text| view! { <p class="modal__error">{text}</p> })}
            <div class="modal__actions">
                <button class="btn" type="button" on:click=move |_| on_close.run(())>
                    "나중에"
                </button>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "등록"
                </button>
            </div>
        </form>
    }
}

#[component]
fn PurchaseConfirmModal(room_id: Id, on_close: Callback<()>) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let api = crate::app::use_api();

    let on_confirm = move |_| {
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let client = api.get_value();
            leptos::task::spawn_local(async move {
                match crate::net::api::confirm_purchase(&client, room_id).await {
                    Ok(()) => on_close.run(()),
                    Err(e) => {
                        leptos::logging::warn!("purchase confirm for room {room_id} failed: {e}");
                        toasts.update(|t| {
                            t.api_error(&e);
                        });
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (room_id, toasts);
    };

    view! {
        <h2 class="modal__title">"상품을 잘 받으셨나요?"</h2>
        <p class="modal__body">"구매를 확정하면 판매자에게 대금이 지급되고 거래가 종료돼요."</p>
        <div class="modal__actions">
            <button class="btn" on:click=move |_| on_close.run(())>
                "나중에"
            </button>
            <button class="btn btn--primary" disabled=move || busy.get() on:click=on_confirm>
                "구매 확정"
            </button>
        </div>
    }
}
