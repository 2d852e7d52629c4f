//! Payment provider redirect pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider redirects to `/payments/success?paymentKey=..&orderId=..&amount=..`
//! or `/payments/fail?code=..&message=..`. Success parameters are validated
//! before being forwarded to the backend for confirmation.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_query_map;

use crate::state::payment::{PaymentState, parse_payment_failure, parse_payment_success};
use crate::util::alive::AliveFlag;
use crate::util::format::format_price;

#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    let query = use_query_map();
    let parsed = query.with_untracked(|q| parse_payment_success(|key| q.get(key)));
    let state = RwSignal::new(match &parsed {
        Ok(_) => PaymentState::Confirming,
        Err(message) => PaymentState::Failed((*message).to_owned()),
    });

    let alive = AliveFlag::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });

    #[cfg(feature = "hydrate")]
    if let Ok(request) = parsed {
        let client = crate::app::use_api().get_value();
        let toasts = expect_context::<RwSignal<crate::state::toast::ToastState>>();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::confirm_payment(&client, &request).await;
            alive.deliver(result, |result| match result {
                Ok(confirmation) => state.set(PaymentState::Confirmed(confirmation)),
                Err(e) => {
                    leptos::logging::warn!("payment confirm for order {} failed: {e}", request.order_id);
                    toasts.update(|t| {
                        t.api_error(&e);
                    });
                    state.set(PaymentState::Failed(e.user_message()));
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (parsed, alive);

    payment_result_view(state)
}

fn payment_result_view(state: RwSignal<PaymentState>) -> impl IntoView {
    view! {
        <div class="payment-page">
            {move || match state.get() {
                PaymentState::Confirming => view! { <p class="payment-page__pending">"결제를 확인하고 있어요..."</p> }.into_any(),
                PaymentState::Confirmed(confirmation) => {
                    view! {
                        <h1>"결제가 완료되었어요"</h1>
                        <dl class="payment-page__summary">
                            <dt>"주문 번호"</dt>
                            <dd>{confirmation.order_id}</dd>
                            <dt>"결제 금액"</dt>
                            <dd>{format_price(confirmation.total_amount)}</dd>
                        </dl>
                        <a class="btn btn--primary" href="/chat">
                            "채팅으로 돌아가기"
                        </a>
                    }
                        .into_any()
                }
                PaymentState::Failed(message) => {
                    view! {
                        <h1>"결제를 확인하지 못했어요"</h1>
                        <p class="payment-page__error">{message}</p>
                        <a class="btn" href="/">
                            "홈으로"
                        </a>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
pub fn PaymentFailPage() -> impl IntoView {
    let query = use_query_map();
    let failure = query.with_untracked(|q| parse_payment_failure(|key| q.get(key)));

    view! {
        <div class="payment-page">
            <h1>"결제에 실패했어요"</h1>
            <p class="payment-page__error">{failure.message}</p>
            <p class="payment-page__code">"오류 코드: " {failure.code}</p>
            <a class="btn" href="/">
                "홈으로"
            </a>
        </div>
    }
}
