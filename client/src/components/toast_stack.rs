//! Fixed-position stack rendering `ToastState`.

use leptos::prelude::*;

use crate::state::toast::{ToastState, ToastVariant};

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    // Schedule auto-dismiss once for every toast id newer than the last seen.
    Effect::new(move |last_seen: Option<u64>| {
        let last_seen = last_seen.unwrap_or(0);
        let fresh: Vec<u64> = toasts.with(|t| t.items.iter().map(|x| x.id).filter(|id| *id > last_seen).collect());
        let newest = fresh.iter().copied().max().unwrap_or(last_seen);
        #[cfg(feature = "hydrate")]
        for id in fresh {
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(crate::state::toast::TOAST_TTL_MS).await;
                toasts.update(|t| t.dismiss(id));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = fresh;
        newest
    });

    view! {
        <div class="toast-stack" aria-live="polite">
            <For each=move || toasts.get().items key=|toast| toast.id let:toast>
                <div
                    class="toast"
                    class:toast--error=toast.variant == ToastVariant::Error
                    class:toast--success=toast.variant == ToastVariant::Success
                >
                    <div class="toast__content">
                        <p class="toast__title">{toast.title.clone()}</p>
                        {toast.description.clone().map(|d| view! { <p class="toast__description">{d}</p> })}
                    </div>
                    <button
                        class="toast__close"
                        title="Dismiss"
                        on:click=move |_| toasts.update(|t| t.dismiss(toast.id))
                    >
                        "×"
                    </button>
                </div>
            </For>
        </div>
    }
}
