// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for feedback persistence backends.

use async_trait::async_trait;

use crate::error::TellboxError;
use crate::types::{FeedbackPage, FeedbackRecord, NewFeedback, SortDirection};

/// Persistence backend for feedback records.
///
/// Implementations own the connection lifecycle and serialize access so
/// that [`FeedbackStore::list`]'s page and total are mutually consistent.
#[async_trait]
pub trait FeedbackStore: Send + Sync + 'static {
    /// Initializes the backend (connection, migrations).
    async fn initialize(&self) -> Result<(), TellboxError>;

    /// Persists a new record, assigning its id and creation timestamp.
    ///
    /// Exactly one record is persisted per successful call; failures are
    /// reported to the caller and never retried.
    async fn insert(&self, new: &NewFeedback) -> Result<FeedbackRecord, TellboxError>;

    /// Returns one page of records plus the unfiltered total count.
    ///
    /// Records are ordered by `(created_at, id)` in the given direction.
    /// Callers pass post-clamp values (`offset >= 0`, `limit >= 1`).
    /// An offset at or past the end yields an empty page, not an error.
    async fn list(
        &self,
        offset: i64,
        limit: i64,
        sort: SortDirection,
    ) -> Result<FeedbackPage, TellboxError>;

    /// Probes the storage medium for liveness.
    async fn health(&self) -> Result<(), TellboxError>;

    /// Flushes pending writes and releases the connection.
    async fn close(&self) -> Result<(), TellboxError>;
}
