//! Generic server-paginated data table with search and drag reordering.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by every entity list page. The page owns data fetching and feeds
//! rows in; the table owns pagination/search interaction and writes it to the
//! URL, which in turn drives the page's next fetch.
//!
//! DESIGN
//! ======
//! - All transitions go through `TableState`; this component only applies
//!   the returned `QueryChange` with `scroll: false` so the viewport stays put.
//! - Drag uses native HTML5 drag events on a dedicated handle column. A drop
//!   commits the new order locally and calls `on_reorder` exactly once.

use std::sync::Arc;

use gateway::query::PAGE_SIZE_OPTIONS;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::table::{DragReorderEvent, EMPTY_MESSAGE, QueryChange, TableBody, TableRecord, TableState};
use crate::util::query_string;

/// One table column: header text plus a cell renderer.
pub struct Column<R> {
    pub header: String,
    pub render: Arc<dyn Fn(&R) -> AnyView + Send + Sync>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            render: Arc::clone(&self.render),
        }
    }
}

impl<R> Column<R> {
    pub fn new(header: impl Into<String>, render: impl Fn(&R) -> AnyView + Send + Sync + 'static) -> Self {
        Self {
            header: header.into(),
            render: Arc::new(render),
        }
    }
}

#[component]
pub fn DataTable<R>(
    columns: Vec<Column<R>>,
    #[prop(into)] rows: Signal<Vec<R>>,
    #[prop(into)] total_items: Signal<u64>,
    #[prop(into)] page_count: Signal<u64>,
    #[prop(default = true)] show_search: bool,
    #[prop(default = true)] show_pagination: bool,
    #[prop(optional)] enable_row_drag: bool,
    #[prop(optional, into)] search_placeholder: Option<String>,
    #[prop(default = None)] on_reorder: Option<Callback<Vec<R>>>,
) -> impl IntoView
where
    R: TableRecord + Send + Sync + 'static,
{
    let location = use_location();
    let navigate = use_navigate();

    let mut initial = TableState::<R>::from_query_string(&location.search.get_untracked());
    initial.set_rows(
        rows.get_untracked(),
        total_items.get_untracked(),
        page_count.get_untracked(),
    );
    let search_text = RwSignal::new(initial.query().search.clone().unwrap_or_default());
    let table = RwSignal::new(initial);

    Effect::new(move || {
        let fresh = rows.get();
        let total = total_items.get();
        let pages = page_count.get();
        table.update(|t| t.set_rows(fresh, total, pages));
    });

    // Back/forward navigation changes the URL without going through the table.
    Effect::new(move || {
        let query = location.search.get();
        let changed = table.try_update(|t| t.sync_with_url(&query)).unwrap_or(false);
        if changed {
            search_text.set(table.with_untracked(|t| t.query().search.clone().unwrap_or_default()));
        }
    });

    let apply = move |change: Option<QueryChange>| {
        let Some(change) = change else {
            return;
        };
        let query = change.apply(&location.search.get_untracked());
        let href = query_string::href(&location.pathname.get_untracked(), &query);
        navigate(
            &href,
            NavigateOptions {
                scroll: false,
                ..NavigateOptions::default()
            },
        );
        table.update(TableState::settle);
    };

    let columns = StoredValue::new(columns);
    let column_count = columns.with_value(Vec::len);
    let dragging = RwSignal::new(None::<String>);

    let finish_drag = move |over_id: String| {
        let Some(active_id) = dragging.get_untracked() else {
            return;
        };
        dragging.set(None);
        let moved = table
            .try_update(|t| {
                let event = DragReorderEvent::between(t.rows(), &active_id, &over_id)?;
                t.reorder(&event)
            })
            .flatten();
        if let (Some(order), Some(on_reorder)) = (moved, on_reorder) {
            on_reorder.run(order);
        }
    };

    let render_row = move |row: &R| {
        let id = row.record_id();
        let drag_id = id.clone();
        let drop_id = id.clone();
        let cells = columns.with_value(|cols| {
            cols.iter()
                .map(|col| view! { <td class="data-table__cell">{(col.render)(row)}</td> })
                .collect_view()
        });
        let handle = enable_row_drag.then(|| {
            view! {
                <td class="data-table__cell data-table__cell--handle">
                    <span
                        class="data-table__handle"
                        draggable="true"
                        title="Drag to reorder"
                        on:dragstart=move |_| dragging.set(Some(drag_id.clone()))
                        on:dragend=move |_| dragging.set(None)
                    >
                        "⠿"
                    </span>
                </td>
            }
        });
        view! {
            <tr
                class="data-table__row"
                class:data-table__row--dragging=move || dragging.get().as_deref() == Some(id.as_str())
                on:dragover=move |ev| {
                    if enable_row_drag {
                        ev.prevent_default();
                    }
                }
                on:drop=move |ev| {
                    ev.prevent_default();
                    finish_drag(drop_id.clone());
                }
            >
                {cells}
                {handle}
            </tr>
        }
    };

    let body = move || {
        table.with(|t| match t.body(column_count, enable_row_drag) {
            TableBody::Empty { colspan } => view! {
                <tr class="data-table__row data-table__row--empty">
                    <td class="data-table__cell" colspan=colspan.to_string()>
                        {EMPTY_MESSAGE}
                    </td>
                </tr>
            }
            .into_any(),
            TableBody::Rows(rows) => rows.iter().map(render_row).collect_view().into_any(),
        })
    };

    let apply_search = apply.clone();
    let apply_size = apply.clone();
    let apply_first = apply.clone();
    let apply_previous = apply.clone();
    let apply_next = apply.clone();
    let apply_last = apply;

    let placeholder = search_placeholder.unwrap_or_else(|| "Search...".to_owned());

    view! {
        <div class="data-table">
            {show_search
                .then(|| {
                    view! {
                        <div class="data-table__toolbar">
                            <input
                                class="data-table__search"
                                type="search"
                                placeholder=placeholder
                                prop:value=move || search_text.get()
                                on:input=move |ev| {
                                    let term = event_target_value(&ev);
                                    search_text.set(term.clone());
                                    apply_search(table.try_update(|t| t.set_search(&term)));
                                }
                            />
                        </div>
                    }
                })}

            <div class="data-table__scroll">
                <table class="data-table__table">
                    <thead>
                        <tr>
                            {columns
                                .with_value(|cols| {
                                    cols.iter()
                                        .map(|col| view! { <th class="data-table__header">{col.header.clone()}</th> })
                                        .collect_view()
                                })}
                            {enable_row_drag.then(|| view! { <th class="data-table__header data-table__header--handle"></th> })}
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>

            {show_pagination
                .then(|| {
                    view! {
                        <div class="data-table__footer">
                            <span class="data-table__total">
                                {move || format!("{} row(s)", table.with(TableState::total_items))}
                            </span>
                            <label class="data-table__page-size">
                                "Rows per page"
                                <select on:change=move |ev| {
                                    let size = event_target_value(&ev).parse::<usize>().unwrap_or_default();
                                    apply_size(table.try_update(|t| t.set_page_size(size)).flatten());
                                }>
                                    {PAGE_SIZE_OPTIONS
                                        .iter()
                                        .map(|&size| {
                                            view! {
                                                <option
                                                    value=size.to_string()
                                                    selected=move || table.with(|t| t.query().page_size == size)
                                                >
                                                    {size.to_string()}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                            </label>
                            <span class="data-table__page-label">{move || table.with(TableState::page_label)}</span>
                            <div class="data-table__pager">
                                <button
                                    class="btn"
                                    title="First page"
                                    disabled=move || !table.with(TableState::can_previous)
                                    on:click=move |_| apply_first(table.try_update(TableState::first_page).flatten())
                                >
                                    "«"
                                </button>
                                <button
                                    class="btn"
                                    title="Previous page"
                                    disabled=move || !table.with(TableState::can_previous)
                                    on:click=move |_| apply_previous(table.try_update(TableState::previous_page).flatten())
                                >
                                    "‹"
                                </button>
                                <button
                                    class="btn"
                                    title="Next page"
                                    disabled=move || !table.with(TableState::can_next)
                                    on:click=move |_| apply_next(table.try_update(TableState::next_page).flatten())
                                >
                                    "›"
                                </button>
                                <button
                                    class="btn"
                                    title="Last page"
                                    disabled=move || !table.with(TableState::can_next)
                                    on:click=move |_| apply_last(table.try_update(TableState::last_page).flatten())
                                >
                                    "»"
                                </button>
                            </div>
                        </div>
                    }
                })}
        </div>
    }
}
