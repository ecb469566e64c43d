// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback listing controller.
//!
//! Holds the admin table's paging state and the last-fetched page. Every
//! state change hands back a [`PendingFetch`] that the caller resolves
//! against the API; results from superseded fetches are discarded, so the
//! table always shows the outcome of the last-triggered request.

use tracing::{debug, warn};

use tellbox_core::{FeedbackRecord, SortDirection, TellboxError};

use crate::client::{ApiClient, ListingPage};

/// Page sizes offered by the admin table.
pub const ROWS_PER_PAGE_OPTIONS: [i64; 4] = [5, 10, 25, 50];

/// Notice shown when a fetch fails.
pub const FETCH_FAILURE: &str = "Failed to fetch feedback data. Please try again.";

/// A fetch obligation produced by a state change.
///
/// Carries the parameters to request and the generation it belongs to.
/// Parameters are sent raw; the server clamps and echoes the effective
/// values, which [`FeedbackListing::apply`] folds back into the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    generation: u64,
    pub page: i64,
    pub rows_per_page: i64,
    pub sort: SortDirection,
}

/// Admin listing state.
#[derive(Debug)]
pub struct FeedbackListing {
    page: i64,
    rows_per_page: i64,
    sort: SortDirection,
    items: Vec<FeedbackRecord>,
    total: i64,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl Default for FeedbackListing {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: 10,
            sort: SortDirection::Descending,
            items: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl FeedbackListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn rows_per_page(&self) -> i64 {
        self.rows_per_page
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    pub fn items(&self) -> &[FeedbackRecord] {
        &self.items
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of pages at the current page size.
    pub fn page_count(&self) -> i64 {
        let rows = self.rows_per_page.max(1);
        (self.total + rows - 1) / rows
    }

    /// Moves to the given page.
    #[must_use = "resolve the pending fetch or the table will not update"]
    pub fn set_page(&mut self, page: i64) -> PendingFetch {
        self.page = page;
        self.begin_fetch()
    }

    /// Changes the page size and returns to the first page.
    #[must_use = "resolve the pending fetch or the table will not update"]
    pub fn set_rows_per_page(&mut self, rows: i64) -> PendingFetch {
        self.rows_per_page = rows;
        self.page = 0;
        self.begin_fetch()
    }

    /// Applies a sort order and returns to the first page.
    ///
    /// Re-applying the current order still resets the page and re-fetches.
    #[must_use = "resolve the pending fetch or the table will not update"]
    pub fn set_sort(&mut self, sort: SortDirection) -> PendingFetch {
        self.sort = sort;
        self.page = 0;
        self.begin_fetch()
    }

    /// Re-fetches with unchanged parameters.
    #[must_use = "resolve the pending fetch or the table will not update"]
    pub fn refresh(&mut self) -> PendingFetch {
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> PendingFetch {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        PendingFetch {
            generation: self.generation,
            page: self.page,
            rows_per_page: self.rows_per_page,
            sort: self.sort,
        }
    }

    /// Folds a fetch result into the state.
    ///
    /// Returns false and leaves the state untouched when a newer fetch has
    /// been triggered since this one began. On success the items, total,
    /// and the server's effective paging values are adopted; on failure the
    /// table is cleared and the warning notice set.
    pub fn apply(
        &mut self,
        pending: &PendingFetch,
        result: Result<ListingPage, TellboxError>,
    ) -> bool {
        if pending.generation != self.generation {
            debug!(
                stale = pending.generation,
                current = self.generation,
                "discarding superseded fetch result"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(body) => {
                self.items = body.data;
                self.total = body.total;
                self.page = body.page;
                self.rows_per_page = body.limit;
                self.sort = body.sort;
            }
            Err(err) => {
                warn!(error = %err, "feedback fetch failed");
                self.items.clear();
                self.total = 0;
                self.error = Some(FETCH_FAILURE.to_string());
            }
        }
        true
    }

    /// Resolves a pending fetch against the API and applies the result.
    pub async fn fetch(&mut self, client: &ApiClient, pending: PendingFetch) -> bool {
        let result = client
            .fetch_feedback(pending.page, pending.rows_per_page, pending.sort)
            .await;
        self.apply(&pending, result)
    }
}
