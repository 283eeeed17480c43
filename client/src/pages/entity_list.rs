//! Paginated list page for any entity (`/admin/:entity`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The URL query string is the source of truth for pagination and search.
//! `DataTable` rewrites it; this page refetches whenever it changes and feeds
//! the resulting page back into the table.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch shows a toast and leaves the previous rows in place. A
//! failed reorder toasts and refetches so the table shows the persisted order.

#[cfg(test)]
#[path = "entity_list_test.rs"]
mod entity_list_test;

use gateway::EntityKind;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_params_map};

use crate::components::admin_shell::AdminShell;
use crate::components::data_table::{Column, DataTable};
use crate::components::row_actions::RowActions;
use crate::entity::EntitySchema;
use crate::entity::catalog::schema_for;
use crate::entity::column::{CellFormat, ColumnDescriptor};
use crate::entity::field::FieldTag;
use crate::net::types::Record;
use crate::state::auth::AuthState;
use crate::state::table::{TableRecord, page_query};
use crate::state::toast::ToastState;
use crate::util::auth::report_error;
use crate::util::paths::create_href;

/// Entity kind named by the `:entity` route segment.
pub(crate) fn use_entity_kind() -> Memo<Option<EntityKind>> {
    let params = use_params_map();
    Memo::new(move |_| params.with(|p| p.get("entity")).and_then(|slug| EntityKind::from_slug(&slug)))
}

/// Hosted image URLs a record owns, for cleanup after delete.
fn image_urls(schema: &EntitySchema, record: &Record) -> Vec<String> {
    schema
        .fields
        .iter()
        .filter(|field| field.tag == FieldTag::Image)
        .map(|field| record.text(&field.name))
        .filter(|url| !url.is_empty())
        .collect()
}

fn cell(descriptor: ColumnDescriptor) -> Column<Record> {
    Column::new(descriptor.header, move |record: &Record| {
        let text = descriptor.cell_text(record);
        match descriptor.format {
            CellFormat::Image if !text.is_empty() => {
                view! { <img class="data-table__thumb" src=text alt=descriptor.header/> }.into_any()
            }
            CellFormat::Image => view! { <span class="data-table__muted">"No image"</span> }.into_any(),
            CellFormat::Status { .. } => view! { <span class="badge">{text}</span> }.into_any(),
            _ => text.into_any(),
        }
    })
}

#[component]
pub fn EntityListPage() -> impl IntoView {
    let kind = use_entity_kind();
    view! {
        <AdminShell>
            {move || match kind.get() {
                Some(kind) => view! { <EntityList kind=kind/> }.into_any(),
                None => view! { <p class="admin-empty">"Unknown section."</p> }.into_any(),
            }}
        </AdminShell>
    }
}

#[component]
fn EntityList(kind: EntityKind) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let location = use_location();
    let schema = schema_for(kind);
    let refresh = RwSignal::new(0_u32);

    let page = LocalResource::new(move || {
        let query = page_query(&location.search.get());
        refresh.track();
        async move { crate::net::api::fetch_page(kind, &query).await }
    });

    Effect::new(move || {
        if let Some(Err(err)) = page.get() {
            report_error(auth, toasts, &format!("Error loading {}", kind.label().to_lowercase()), &err);
        }
    });

    let loaded = move || page.get().and_then(Result::ok).unwrap_or_default();
    let rows = Signal::derive(move || loaded().docs);
    let total_items = Signal::derive(move || loaded().total_docs);
    let page_count = Signal::derive(move || loaded().total_pages);

    let on_deleted = Callback::new(move |()| refresh.update(|n| *n += 1));
    let mut columns: Vec<Column<Record>> = schema.columns.iter().copied().map(cell).collect();
    let image_fields = schema.clone();
    columns.push(Column::new("Actions", move |record: &Record| {
        view! {
            <RowActions
                kind=kind
                id=record.record_id()
                image_urls=image_urls(&image_fields, record)
                on_deleted=on_deleted
            />
        }
        .into_any()
    }));

    let on_reorder = kind.supports_reorder().then(|| {
        Callback::new(move |ordered: Vec<Record>| {
            let ids: Vec<String> = ordered.iter().map(TableRecord::record_id).collect();
            let offset = page_query(&location.search.get_untracked()).offset();
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match crate::net::api::persist_order(kind, ids, offset).await {
                    Ok(()) => toasts.update(|t| {
                        t.success("Order updated.");
                    }),
                    Err(err) => {
                        report_error(auth, toasts, "Error saving order", &err);
                        refresh.update(|n| *n += 1);
                    }
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = (ids, offset);
        })
    });

    view! {
        <div class="entity-list">
            <header class="entity-list__header">
                <h1>{kind.label()}</h1>
                <a class="btn btn--primary" href=create_href(kind)>"Add New"</a>
            </header>
            {move || page.get().is_none().then(|| view! { <p class="entity-list__loading">"Loading..."</p> })}
            <DataTable
                columns=columns
                rows=rows
                total_items=total_items
                page_count=page_count
                enable_row_drag=kind.supports_reorder()
                search_placeholder=schema.search_placeholder
                on_reorder=on_reorder
            />
        </div>
    }
}

