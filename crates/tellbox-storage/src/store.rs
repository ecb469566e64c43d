// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the FeedbackStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use tellbox_config::model::StorageConfig;
use tellbox_core::{FeedbackPage, FeedbackRecord, FeedbackStore, NewFeedback, SortDirection, TellboxError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed feedback store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is lazily initialized on the first
/// call to [`FeedbackStore::initialize`].
pub struct SqliteFeedbackStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteFeedbackStore {
    /// Create a new SqliteFeedbackStore with the given configuration.
    ///
    /// The database connection is not opened until [`FeedbackStore::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, TellboxError> {
        self.db.get().ok_or_else(|| TellboxError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl FeedbackStore for SqliteFeedbackStore {
    async fn initialize(&self) -> Result<(), TellboxError> {
        let path = self.config.database_path.clone();
        let db = Database::open(&path).await?;
        self.db.set(db).map_err(|_| TellboxError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite feedback store initialized");
        Ok(())
    }

    async fn insert(&self, new: &NewFeedback) -> Result<FeedbackRecord, TellboxError> {
        queries::feedback::insert(self.db()?, new).await
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
        sort: SortDirection,
    ) -> Result<FeedbackPage, TellboxError> {
        queries::feedback::list(self.db()?, offset, limit, sort).await
    }

    async fn health(&self) -> Result<(), TellboxError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), TellboxError> {
        // The handle stays in the OnceCell, so checkpoint instead of
        // consuming the connection.
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
