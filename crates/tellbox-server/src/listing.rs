// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback listing service.
//!
//! Normalizes raw query input through [`ListParams`] and returns the page
//! together with the effective paging values, so clients can reconcile
//! their UI state with what the server actually used.

use serde::{Deserialize, Serialize};

use tellbox_core::{FeedbackRecord, FeedbackStore, ListParams, SortDirection, TellboxError};

/// Raw query parameters for GET /feedback.
///
/// Captured as strings so that unparseable input falls back to defaults
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// One page of feedback annotated with the effective paging values.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub items: Vec<FeedbackRecord>,
    pub total: i64,
    /// Effective (post-clamp) page index.
    pub page: i64,
    /// Effective (post-clamp) page size.
    pub limit: i64,
    /// Normalized sort direction.
    pub sort: SortDirection,
}

/// Normalize the query, fetch one page, and echo the effective values.
pub async fn list(store: &dyn FeedbackStore, query: &ListQuery) -> Result<Listing, TellboxError> {
    let params = ListParams::from_query(
        query.page.as_deref(),
        query.limit.as_deref(),
        query.sort.as_deref(),
    );

    let page = store.list(params.offset(), params.limit, params.sort).await?;

    Ok(Listing {
        items: page.items,
        total: page.total,
        page: params.page,
        limit: params.limit,
        sort: params.sort,
    })
}
