//! Pagination, search, and row-order state for the generic data table.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every entity list page renders one `DataTable`. The table's pagination and
//! search live in the page URL (`page` is 1-based, `limit`, `search`) so that a
//! reload or a shared link reproduces the same view. This module is the pure
//! state machine behind that component; the component only applies the
//! `QueryChange` each transition returns.
//!
//! DESIGN
//! ======
//! - Page size changes keep the first visible row on screen: the new index is
//!   `old_index * old_size / new_size`.
//! - Entering a search term drops `page`/`limit` from the URL and resets the
//!   state to the first page at the default size, so state and URL agree.
//! - Reorders are optimistic. The new order is committed locally and handed to
//!   the caller once; reconciliation after a failed persist is a refetch.
//!
//! STATE MACHINE
//! =============
//! `Idle -> Paginating -> Idle` on page or size changes and
//! `Idle -> Searching -> Idle` on search edits. `settle` closes either one
//! after the URL write has been issued.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use gateway::query::{DEFAULT_PAGE_SIZE, LIMIT_PARAM, PAGE_PARAM, PageQuery, SEARCH_PARAM};

use crate::util::query_string;

/// A row type the table can key, reorder, and hand back to callers.
pub trait TableRecord: Clone {
    /// Stable unique identifier used for row keys and drag targets.
    fn record_id(&self) -> String;
}

/// Which URL write, if any, the table is in the middle of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TablePhase {
    #[default]
    Idle,
    Paginating,
    Searching,
}

/// Ordered URL parameter edits: `Some` sets, `None` removes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryChange {
    pub edits: Vec<(&'static str, Option<String>)>,
}

impl QueryChange {
    /// Rewrite `query` with these edits, keeping unrelated parameters.
    pub fn apply(&self, query: &str) -> String {
        query_string::apply_edits(query, &self.edits)
    }
}

/// A completed drag: the row `moved_id` went from `from_index` to `to_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragReorderEvent {
    pub moved_id: String,
    pub from_index: usize,
    pub to_index: usize,
}

impl DragReorderEvent {
    /// Resolve a drop of `active_id` onto `over_id` against the current rows.
    ///
    /// Returns `None` for unknown ids or a drop onto itself.
    pub fn between<R: TableRecord>(rows: &[R], active_id: &str, over_id: &str) -> Option<Self> {
        if active_id == over_id {
            return None;
        }
        let from_index = rows.iter().position(|r| r.record_id() == active_id)?;
        let to_index = rows.iter().position(|r| r.record_id() == over_id)?;
        Some(Self {
            moved_id: active_id.to_owned(),
            from_index,
            to_index,
        })
    }
}

/// What the table body should render.
#[derive(Debug, PartialEq)]
pub enum TableBody<'a, R> {
    Rows(&'a [R]),
    /// One "No results." row spanning every column.
    Empty { colspan: usize },
}

/// Message shown in the single row of an empty table.
pub const EMPTY_MESSAGE: &str = "No results.";

/// Pagination and search carried by a location query string.
pub fn page_query(query: &str) -> PageQuery {
    let pairs = query_string::parse(query);
    PageQuery::from_params(
        query_string::get(&pairs, PAGE_PARAM),
        query_string::get(&pairs, LIMIT_PARAM),
        query_string::get(&pairs, SEARCH_PARAM),
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableState<R> {
    query: PageQuery,
    rows: Vec<R>,
    total_items: u64,
    page_count: u64,
    phase: TablePhase,
}

impl<R: TableRecord> TableState<R> {
    pub fn new(query: PageQuery) -> Self {
        Self {
            query,
            rows: Vec::new(),
            total_items: 0,
            page_count: 0,
            phase: TablePhase::Idle,
        }
    }

    /// Initial state from the location's query string.
    ///
    /// Missing or invalid `page`/`limit` fall back to page 1 of 10 rows.
    pub fn from_query_string(query: &str) -> Self {
        Self::new(page_query(query))
    }

    /// Adopt the URL's pagination after an external navigation (back/forward).
    ///
    /// Returns whether anything changed.
    pub fn sync_with_url(&mut self, query: &str) -> bool {
        let from_url = Self::from_query_string(query).query;
        self.phase = TablePhase::Idle;
        if from_url == self.query {
            return false;
        }
        self.query = from_url;
        true
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn page_count(&self) -> u64 {
        self.page_count
    }

    /// Replace the visible rows with a freshly fetched page.
    pub fn set_rows(&mut self, rows: Vec<R>, total_items: u64, page_count: u64) {
        self.rows = rows;
        self.total_items = total_items;
        self.page_count = page_count;
    }

    /// Current pagination as URL edits (`page` is 1-based).
    pub fn pagination_change(&self) -> QueryChange {
        QueryChange {
            edits: vec![
                (PAGE_PARAM, Some(self.query.page_number().to_string())),
                (LIMIT_PARAM, Some(self.query.page_size.to_string())),
            ],
        }
    }

    /// Jump to a zero-based page. `None` when already there.
    pub fn set_page_index(&mut self, page_index: usize) -> Option<QueryChange> {
        if page_index == self.query.page_index {
            return None;
        }
        self.query.page_index = page_index;
        self.phase = TablePhase::Paginating;
        Some(self.pagination_change())
    }

    pub fn first_page(&mut self) -> Option<QueryChange> {
        self.set_page_index(0)
    }

    pub fn previous_page(&mut self) -> Option<QueryChange> {
        if !self.can_previous() {
            return None;
        }
        self.set_page_index(self.query.page_index - 1)
    }

    pub fn next_page(&mut self) -> Option<QueryChange> {
        if !self.can_next() {
            return None;
        }
        self.set_page_index(self.query.page_index + 1)
    }

    pub fn last_page(&mut self) -> Option<QueryChange> {
        let last = usize::try_from(self.page_count.saturating_sub(1)).unwrap_or(usize::MAX);
        self.set_page_index(last)
    }

    /// Change rows per page, keeping the first visible row on screen.
    pub fn set_page_size(&mut self, page_size: usize) -> Option<QueryChange> {
        if page_size == 0 || page_size == self.query.page_size {
            return None;
        }
        let first_row = self.query.page_index * self.query.page_size;
        self.query.page_index = first_row / page_size;
        self.query.page_size = page_size;
        self.phase = TablePhase::Paginating;
        Some(self.pagination_change())
    }

    /// Apply a search edit. An empty term clears the search.
    pub fn set_search(&mut self, term: &str) -> QueryChange {
        let term = term.trim();
        self.phase = TablePhase::Searching;
        self.query.page_index = 0;
        self.query.page_size = DEFAULT_PAGE_SIZE;
        let search = if term.is_empty() {
            None
        } else {
            Some(term.to_owned())
        };
        self.query.search.clone_from(&search);
        QueryChange {
            edits: vec![(PAGE_PARAM, None), (LIMIT_PARAM, None), (SEARCH_PARAM, search)],
        }
    }

    /// Return to `Idle` once the URL write has been issued.
    pub fn settle(&mut self) {
        self.phase = TablePhase::Idle;
    }

    pub fn can_previous(&self) -> bool {
        self.query.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        (self.query.page_index as u64) + 1 < self.page_count
    }

    /// "Page X of Y", never showing zero pages.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.query.page_number(), self.page_count.max(1))
    }

    /// Commit a drag locally and return the full new order for persistence.
    ///
    /// Returns `None` when the event no longer matches the current rows.
    pub fn reorder(&mut self, event: &DragReorderEvent) -> Option<Vec<R>> {
        let len = self.rows.len();
        if event.from_index == event.to_index || event.from_index >= len || event.to_index >= len {
            return None;
        }
        if self.rows[event.from_index].record_id() != event.moved_id {
            return None;
        }
        move_item(&mut self.rows, event.from_index, event.to_index);
        Some(self.rows.clone())
    }

    /// Body to render given the visible column count (drag column excluded).
    pub fn body(&self, column_count: usize, row_drag: bool) -> TableBody<'_, R> {
        if self.rows.is_empty() {
            TableBody::Empty {
                colspan: (column_count + usize::from(row_drag)).max(1),
            }
        } else {
            TableBody::Rows(&self.rows)
        }
    }
}

/// Remove the item at `from` and insert it at `to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}
