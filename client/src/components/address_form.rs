//! Create/edit form for a delivery address.

use leptos::prelude::*;

use crate::net::types::AddressRequest;
use crate::state::addresses::AddressForm;

/// Address form. Validation runs before `on_submit` is called.
#[component]
pub fn AddressFormView(
    initial: AddressForm,
    busy: Signal<bool>,
    on_submit: Callback<AddressRequest>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(initial);
    let error = RwSignal::new(None::<&'static str>);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match form.with_untracked(AddressForm::validate) {
            Ok(request) => {
                error.set(None);
                on_submit.run(request);
            }
            Err(message) => error.set(Some(message)),
        }
    };

    view! {
        <form class="address-form" on:submit=submit>
            <input
                placeholder="받는 분"
                prop:value=move || form.with(|f| f.recipient_name.clone())
                on:input=move |ev| form.update(|f| f.recipient_name = event_target_value(&ev))
            />
            <input
                placeholder="휴대폰 번호"
                inputmode="tel"
                prop:value=move || form.with(|f| f.phone_number.clone())
                on:input=move |ev| form.update(|f| f.phone_number = event_target_value(&ev))
            />
            <input
                placeholder="우편번호"
                inputmode="numeric"
                maxlength="5"
                prop:value=move || form.with(|f| f.zip_code.clone())
                on:input=move |ev| form.update(|f| f.zip_code = event_target_value(&ev))
            />
            <input
                placeholder="도로명 주소"
                prop:value=move || form.with(|f| f.road_address.clone())
                on:input=move |ev| form.update(|f| f.road_address = event_target_value(&ev))
            />
            <input
                placeholder="상세 주소"
                prop:value=move || form.with(|f| f.detail_address.clone())
                on:input=move |ev| form.update(|f| f.detail_address = event_target_value(&ev))
            />
            <label class="address-form__default">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.default)
                    on:change=move |ev| form.update(|f| f.default = event_target_checked(&ev))
                />
                "기본 배송지로 설정"
            </label>
            {move || error.get().map(|text| view! { <p class="address-form__error">{text}</p> })}
            <div class="address-form__actions">
                <button class="btn" type="button" on:click=move |_| on_cancel.run(())>
                    "취소"
                </button>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "저장"
                </button>
            </div>
        </form>
    }
}
