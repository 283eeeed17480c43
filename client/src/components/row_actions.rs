//! Per-row edit, resend, and delete actions for entity tables.

use gateway::EntityKind;
use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::paths;

#[component]
pub fn RowActions(
    kind: EntityKind,
    id: String,
    /// Hosted images owned by the row, removed after a successful delete.
    #[prop(optional)]
    image_urls: Vec<String>,
    on_deleted: Callback<()>,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let confirming = RwSignal::new(false);
    let deleting = RwSignal::new(false);

    let edit = kind.supports_update().then(|| paths::update_href(kind, &id));
    let resend = paths::resend_href(kind, &id);
    let id = StoredValue::new(id);
    let image_urls = StoredValue::new(image_urls);

    let on_confirm = move |_| {
        if deleting.get_untracked() {
            return;
        }
        deleting.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let record_id = id.get_value();
            match crate::net::api::delete_record(kind, &record_id).await {
                Ok(()) => {
                    for url in image_urls.get_value() {
                        if let Err(err) = crate::net::api::delete_asset(&url).await {
                            leptos::logging::warn!("image cleanup failed for {url}: {}", err.detail());
                        }
                    }
                    toasts.update(|t| {
                        t.success(format!("{} deleted successfully.", kind.label()));
                    });
                    on_deleted.run(());
                }
                Err(err) => crate::util::auth::report_error(
                    auth,
                    toasts,
                    &format!("Error deleting {}", kind.label().to_lowercase()),
                    &err,
                ),
            }
            deleting.set(false);
            confirming.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, toasts, id, image_urls, on_deleted);
    };

    view! {
        <div class="row-actions">
            {edit.map(|href| view! { <a class="btn btn--small" href=href>"Edit"</a> })}
            {resend.map(|href| view! { <a class="btn btn--small" href=href>"Resend"</a> })}
            <button class="btn btn--small btn--danger" on:click=move |_| confirming.set(true)>
                "Delete"
            </button>
            <Show when=move || confirming.get()>
                <div class="dialog-backdrop" on:click=move |_| confirming.set(false)>
                    <div class="dialog" role="alertdialog" on:click=|ev| ev.stop_propagation()>
                        <h2 class="dialog__title">"Are you absolutely sure?"</h2>
                        <p class="dialog__body">
                            {format!(
                                "This will permanently delete this {}. This action cannot be undone.",
                                kind.label().to_lowercase(),
                            )}
                        </p>
                        <div class="dialog__actions">
                            <button class="btn btn--ghost" on:click=move |_| confirming.set(false)>
                                "Cancel"
                            </button>
                            <button class="btn btn--danger" disabled=move || deleting.get() on:click=on_confirm>
                                {move || if deleting.get() { "Deleting..." } else { "Continue" }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
