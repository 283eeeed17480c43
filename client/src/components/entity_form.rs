//! Generic create/update/resend form for any entity schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! Entity edit pages resolve the schema's reference options and the existing
//! record first, then mount this form once with everything it needs.
//!
//! DESIGN
//! ======
//! Submit runs in a fixed order: validate, upload pending images, build the
//! typed payload, save, then navigate back to the list. Nothing is sent when
//! validation fails, and `FormState::begin_submit` drops double submits.
//! After an update that replaced an image, the old asset is deleted
//! best-effort; a failed cleanup is logged, not surfaced.

#[cfg(test)]
#[path = "entity_form_test.rs"]
mod entity_form_test;

use gateway::EntityKind;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::form_field::{FormField, PendingUploads};
use crate::entity::field::FieldDescriptor;
use crate::entity::validate::validate;
use crate::entity::{EntitySchema, FormMode};
use crate::error::AppError;
use crate::net::types::Record;
use crate::state::auth::AuthState;
use crate::state::form::FormState;
use crate::state::toast::ToastState;
use crate::util::auth::report_error;
use crate::util::paths;

#[cfg(any(test, feature = "hydrate"))]
fn success_message(kind: EntityKind, mode: FormMode) -> String {
    match mode {
        FormMode::Create => format!("{} created successfully.", kind.label()),
        FormMode::Update => format!("{} updated successfully.", kind.label()),
        FormMode::Resend => format!("{} resent successfully.", kind.label()),
    }
}

fn failure_context(kind: EntityKind, mode: FormMode) -> String {
    let verb = match mode {
        FormMode::Create => "creating",
        FormMode::Update => "updating",
        FormMode::Resend => "resending",
    };
    format!("Error {verb} {}", kind.label().to_lowercase())
}

/// Hosted images an update is about to replace, for cleanup after save.
#[cfg(any(test, feature = "hydrate"))]
fn replaced_assets(
    previous: &serde_json::Map<String, serde_json::Value>,
    uploaded: &std::collections::BTreeMap<String, Vec<String>>,
) -> Vec<String> {
    uploaded
        .keys()
        .filter_map(|field| previous.get(field).and_then(serde_json::Value::as_str))
        .filter(|url| gateway::asset::public_id_from_url(url).is_ok())
        .map(str::to_owned)
        .collect()
}

#[cfg(feature = "hydrate")]
async fn submit(
    kind: EntityKind,
    mode: FormMode,
    record_id: Option<String>,
    form: RwSignal<FormState>,
    fields: StoredValue<Vec<FieldDescriptor>>,
    uploads: PendingUploads,
    folder: &'static str,
) -> Result<(), AppError> {
    use std::collections::BTreeMap;

    use crate::entity::build_payload;
    use crate::entity::field::FieldTag;
    use crate::net::api;

    let image_fields: Vec<String> = fields.with_value(|fs| {
        fs.iter()
            .filter(|f| f.tag == FieldTag::Image)
            .map(|f| f.name.clone())
            .collect()
    });
    let mut uploaded = BTreeMap::new();
    for name in image_fields {
        let files = uploads.get(&name);
        if files.is_empty() {
            continue;
        }
        let urls = api::upload_images(&files, folder).await?;
        uploaded.insert(name, urls);
    }

    let (payload, replaced) = form.with_untracked(|f| {
        let payload = fields.with_value(|fs| build_payload(&f.values, fs, &uploaded));
        (payload, replaced_assets(&f.values, &uploaded))
    });
    api::save_record(kind, mode, record_id.as_deref(), payload).await?;

    if mode == FormMode::Update {
        for url in replaced {
            if let Err(err) = api::delete_asset(&url).await {
                leptos::logging::warn!("old image cleanup failed for {url}: {}", err.detail());
            }
        }
    }
    Ok(())
}

#[component]
pub fn EntityForm(
    schema: EntitySchema,
    /// Schema fields with reference options already resolved.
    fields: Vec<FieldDescriptor>,
    mode: FormMode,
    #[prop(optional)] record: Option<Record>,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let kind = schema.kind;
    let folder = schema.upload_folder();
    let record_id = record.as_ref().and_then(Record::id);
    let form = RwSignal::new(FormState::new(schema.initial_values(record.as_ref())));
    let uploads = PendingUploads::new();
    let fields = StoredValue::new(fields);
    let list_path = paths::list_href(kind);

    let on_submit = {
        let list_path = list_path.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let errors = form.with_untracked(|f| fields.with_value(|fs| validate(f, fs)));
            if !errors.is_empty() {
                form.update(|f| f.set_errors(errors.clone()));
                report_error(auth, toasts, &failure_context(kind, mode), &AppError::Validation(errors));
                return;
            }
            if !form.try_update(FormState::begin_submit).unwrap_or(false) {
                return;
            }

            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                let list_path = list_path.clone();
                let record_id = record_id.clone();
                leptos::task::spawn_local(async move {
                    let result = submit(kind, mode, record_id, form, fields, uploads, folder).await;
                    form.update(FormState::finish_submit);
                    match result {
                        Ok(()) => {
                            uploads.clear();
                            toasts.update(|t| {
                                t.success(success_message(kind, mode));
                            });
                            navigate(&list_path, leptos_router::NavigateOptions::default());
                        }
                        Err(err) => report_error(auth, toasts, &failure_context(kind, mode), &err),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (&navigate, &list_path, &record_id, folder);
        }
    };

    view! {
        <form class="entity-form" novalidate=true on:submit=on_submit>
            <div class="entity-form__fields">
                {fields
                    .with_value(|fs| {
                        fs.iter()
                            .cloned()
                            .map(|field| view! { <FormField field=field form=form uploads=uploads/> })
                            .collect_view()
                    })}
            </div>
            <div class="entity-form__actions">
                <a class="btn btn--ghost" href=list_path>
                    "Cancel"
                </a>
                <button class="btn btn--primary" type="submit" disabled=move || form.with(|f| f.submitting)>
                    {move || if form.with(|f| f.submitting) { "Saving..." } else { mode.submit_label() }}
                </button>
            </div>
        </form>
    }
}
