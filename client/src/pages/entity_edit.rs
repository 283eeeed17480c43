//! Create, update, and resend pages for any entity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routes `/admin/:entity/create`, `/admin/:entity/update/:id`, and
//! `/admin/:entity/resend/:id` all land here. The page loads the existing
//! record (update and resend) together with every reference list the schema
//! needs, then mounts `EntityForm` once both are in hand.
//!
//! ERROR HANDLING
//! ==============
//! Any failed load replaces the form with a single error message; the form is
//! never shown with partially populated options.

#[cfg(test)]
#[path = "entity_edit_test.rs"]
mod entity_edit_test;

use gateway::EntityKind;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::entity_list::use_entity_kind;
use crate::components::admin_shell::AdminShell;
use crate::components::entity_form::EntityForm;
use crate::entity::catalog::schema_for;
use crate::entity::field::FieldDescriptor;
use crate::entity::{EntitySchema, FormMode};
use crate::error::{AppError, LOAD_FAILED_MESSAGE};
use crate::net::types::Record;
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::auth::report_error;
use crate::util::reference::join_reference_options;

fn page_title(kind: EntityKind, mode: FormMode) -> String {
    let verb = match mode {
        FormMode::Create => "Create",
        FormMode::Update => "Update",
        FormMode::Resend => "Resend",
    };
    format!("{verb} {}", kind.label())
}

/// Whether `kind` offers the screen for `mode`.
fn mode_allowed(kind: EntityKind, mode: FormMode) -> bool {
    match mode {
        FormMode::Create => true,
        FormMode::Update => kind.supports_update(),
        FormMode::Resend => kind.supports_resend(),
    }
}

/// Existing record (when the mode edits one) plus resolved fields.
async fn load(schema: EntitySchema, mode: FormMode, id: Option<String>) -> Result<(Option<Record>, Vec<FieldDescriptor>), AppError> {
    let kind = schema.kind;
    let record = async move {
        match id.filter(|_| mode.loads_record()) {
            Some(id) => crate::net::api::fetch_record(kind, &id).await.map(Some),
            None => Ok(None),
        }
    };
    let reference_kinds = schema.reference_kinds();
    let references = join_reference_options(&reference_kinds, crate::net::api::fetch_options);
    let (record, references) = futures::future::try_join(record, references).await?;
    Ok((record, schema.resolve_fields(&references)))
}

#[component]
pub fn EntityEditPage(mode: FormMode) -> impl IntoView {
    let kind = use_entity_kind();
    let params = use_params_map();
    let id = Memo::new(move |_| params.with(|p| p.get("id")));

    view! {
        <AdminShell>
            {move || match kind.get() {
                Some(kind) if mode_allowed(kind, mode) => {
                    view! { <EntityEditor kind=kind mode=mode id=id.get()/> }.into_any()
                }
                Some(kind) => {
                    view! { <p class="admin-empty">{format!("{} records cannot be edited this way.", kind.label())}</p> }
                        .into_any()
                }
                None => view! { <p class="admin-empty">"Unknown section."</p> }.into_any(),
            }}
        </AdminShell>
    }
}

#[component]
fn EntityEditor(kind: EntityKind, mode: FormMode, id: Option<String>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let schema = schema_for(kind);

    let loaded = {
        let schema = schema.clone();
        LocalResource::new(move || load(schema.clone(), mode, id.clone()))
    };

    Effect::new(move || {
        if let Some(Err(err)) = loaded.get() {
            report_error(auth, toasts, &format!("Error loading {}", kind.label().to_lowercase()), &err);
        }
    });

    view! {
        <div class="entity-edit">
            <h1 class="entity-edit__title">{page_title(kind, mode)}</h1>
            <Suspense fallback=|| view! { <p class="entity-edit__loading">"Loading..."</p> }>
                {move || {
                    loaded.get().map(|result| match result {
                        Ok((record, fields)) => {
                            match record {
                                Some(record) => {
                                    view! { <EntityForm schema=schema.clone() fields=fields mode=mode record=record/> }
                                        .into_any()
                                }
                                None => view! { <EntityForm schema=schema.clone() fields=fields mode=mode/> }.into_any(),
                            }
                        }
                        Err(_) => view! { <p class="entity-edit__error">{LOAD_FAILED_MESSAGE}</p> }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}
