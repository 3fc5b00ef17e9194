//! Collection state and pagination cursor.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Paginated;
use crate::error::ApiError;
use crate::models::Page;

/// Group label used when a record has none.
pub const UNKNOWN_LABEL: &str = "unknown";

// == Pagination Cursor ==
/// Per-collection page tracking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationCursor {
    /// Last page merged into the collection (starts at 1)
    pub page: u32,
    pub page_size: u32,
    /// Whether another page is worth requesting
    pub has_more: bool,
    /// Last total-count hint from the backend, advisory only
    pub total: Option<u64>,
}

impl PaginationCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            has_more: false,
            total: None,
        }
    }
}

// == Collection State ==
/// Items accumulated across pages of one collection.
///
/// `derived_counts` is computed from page 1 only and is NOT updated when
/// later pages are appended. It approximates the grouping of the whole
/// collection and is refreshed by the next page-1 fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionState<T> {
    /// Insertion-ordered items; page 1 replaces, later pages append
    pub items: Vec<T>,
    /// Item count per group label, from page 1
    pub derived_counts: BTreeMap<String, u64>,
    pub cursor: PaginationCursor,
    pub loading: bool,
    pub error: Option<String>,
    /// When the last successful fetch was merged (Unix milliseconds)
    pub fetched_at: Option<u64>,
}

impl<T> CollectionState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            derived_counts: BTreeMap::new(),
            cursor: PaginationCursor::new(page_size),
            loading: false,
            error: None,
            fetched_at: None,
        }
    }

    /// Whether any page has been merged yet.
    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }

    // == Record Failure ==
    /// Keeps items and cursor; only `error` and `loading` change.
    pub fn record_failure(&mut self, err: &ApiError) {
        self.error = Some(err.to_string());
        self.loading = false;
    }
}

impl<T: Paginated> CollectionState<T> {
    // == Apply Page ==
    /// Merges one fetched page.
    ///
    /// `has_more` is true only when the page came back full, was not empty,
    /// and the backend's total (when known) has not been reached.
    pub fn apply_page(&mut self, page_number: u32, page: Page<T>, now: u64) {
        let returned = page.items.len();

        if page_number == 1 {
            self.items = page.items;
            self.derived_counts = derive_counts(&self.items);
        } else {
            self.items.extend(page.items);
        }

        if page.total.is_some() {
            self.cursor.total = page.total;
        }

        let full_page = returned > 0 && returned == self.cursor.page_size as usize;
        let total_reached = self
            .cursor
            .total
            .is_some_and(|total| self.items.len() as u64 >= total);

        self.cursor.page = page_number;
        self.cursor.has_more = full_page && !total_reached;
        self.loading = false;
        self.error = None;
        self.fetched_at = Some(now);
    }
}

/// Counts items per group label.
pub fn derive_counts<T: Paginated>(items: &[T]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for item in items {
        let label = item
            .group_label()
            .filter(|label| !label.is_empty())
            .unwrap_or(UNKNOWN_LABEL);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}
