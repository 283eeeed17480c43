//! Pagination and search parameters for server-driven list views.
//!
//! The page index is zero-based in memory and one-based everywhere it is
//! surfaced (URL query string, backend `page` parameter).

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";
pub const SEARCH_PARAM: &str = "search";

/// Current page, page size, and optional free-text filter of a list view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page_index: usize,
    pub page_size: usize,
    pub search: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page_index: DEFAULT_PAGE_NUMBER - 1, page_size: DEFAULT_PAGE_SIZE, search: None }
    }
}

impl PageQuery {
    /// Build a query from raw URL values.
    ///
    /// Absent or non-numeric values fall back to page 1 / limit 10, as do
    /// zero values, which can never address a real page.
    #[must_use]
    pub fn from_params(page: Option<&str>, limit: Option<&str>, search: Option<&str>) -> Self {
        let page_number = parse_positive(page).unwrap_or(DEFAULT_PAGE_NUMBER);
        let page_size = parse_positive(limit).unwrap_or(DEFAULT_PAGE_SIZE);
        let search = search.filter(|s| !s.is_empty()).map(str::to_owned);
        Self { page_index: page_number - 1, page_size, search }
    }

    /// One-based page number as surfaced in URLs and backend calls.
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }

    /// Rows before the first one on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page_index * self.page_size
    }

    /// Query pairs forwarded to a backend list endpoint.
    #[must_use]
    pub fn api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (PAGE_PARAM, self.page_number().to_string()),
            (LIMIT_PARAM, self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push((SEARCH_PARAM, search.clone()));
        }
        params
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Raw list parameters as they arrive on a query string.
///
/// Values stay strings so malformed input degrades to defaults instead of
/// rejecting the whole request.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    #[must_use]
    pub fn page_query(&self) -> PageQuery {
        PageQuery::from_params(self.page.as_deref(), self.limit.as_deref(), self.search.as_deref())
    }
}
