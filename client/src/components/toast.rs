//! Toast alerts for failed actions.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

/// How long a toast stays up before dismissing itself.
#[cfg(feature = "hydrate")]
const TOAST_TTL: std::time::Duration = std::time::Duration::from_secs(4);

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    // Ids are increasing, so remembering the newest scheduled one is enough.
    #[cfg(feature = "hydrate")]
    {
        let scheduled = StoredValue::new(0_u64);
        Effect::new(move || {
            let fresh: Vec<u64> = toasts.with(|t| {
                t.toasts
                    .iter()
                    .map(|toast| toast.id)
                    .filter(|id| *id > scheduled.get_value())
                    .collect()
            });
            for id in fresh {
                scheduled.set_value(id);
                leptos::task::spawn_local(async move {
                    gloo_timers::future::sleep(TOAST_TTL).await;
                    toasts.update(|t| t.dismiss(id));
                });
            }
        });
    }

    view! {
        <div class="toast-host" role="status">
            <For
                each=move || toasts.with(|t| t.toasts.clone())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let is_error = toast.kind == ToastKind::Error;
                    view! {
                        <div class="toast" class:toast--error=is_error>
                            <span>{toast.message}</span>
                            <button class="toast__close" on:click=move |_| toasts.update(|t| t.dismiss(id))>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
