// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite connection lifecycle: open, PRAGMA setup, checkpoint, close.
//!
//! Every read and write funnels through one tokio-rusqlite background
//! thread. Do not open additional connections for writes.

use std::path::Path;

use tellbox_core::TellboxError;
use tracing::debug;

/// Handle to the SQLite database.
///
/// Wraps a single [`tokio_rusqlite::Connection`]; query modules accept
/// `&Database` and run their work inside `connection().call()` closures,
/// which also makes multi-statement reads (count + page) mutually
/// consistent without explicit transactions.
pub struct Database {
    connection: tokio_rusqlite::Connection,
}

impl Database {
    /// Open the database at `path`, running migrations and PRAGMA setup.
    ///
    /// Parent directories are created if missing. Migrations run on a
    /// short-lived blocking connection before the async handle exists,
    /// since refinery needs exclusive mutable access.
    pub async fn open(path: &str) -> Result<Self, TellboxError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| TellboxError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let migration_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), TellboxError> {
            let mut conn =
                rusqlite::Connection::open(&migration_path).map_err(|e| TellboxError::Storage {
                    source: Box::new(e),
                })?;
            // WAL is persistent in the database file; set it once here.
            conn.execute_batch("PRAGMA journal_mode = WAL;")
                .map_err(|e| TellboxError::Storage {
                    source: Box::new(e),
                })?;
            crate::migrations::run_migrations(&mut conn)?;
            Ok(())
        })
        .await
        .map_err(|e| TellboxError::Internal(format!("migration task panicked: {e}")))??;

        let connection = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| TellboxError::Storage {
                source: Box::new(e),
            })?;

        // Per-connection PRAGMAs must be set on the long-lived handle.
        connection
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch(
                    "PRAGMA synchronous = NORMAL;
                     PRAGMA foreign_keys = ON;
                     PRAGMA busy_timeout = 5000;",
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { connection })
    }

    /// Returns the underlying tokio-rusqlite connection handle.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.connection
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), TellboxError> {
        self.connection
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.connection.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
pub(crate) fn map_tr_err(err: tokio_rusqlite::Error) -> TellboxError {
    TellboxError::Storage {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("open_test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        assert!(db_path.exists(), "database file should be created");

        // The feedback table from V1 must exist.
        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                let n = conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'feedback'",
                    [],
                    |row| row.get(0),
                )?;
                Ok(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/dirs/test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_is_idempotent_across_restarts() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");

        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();

        // Second open re-runs the migration runner, which must be a no-op.
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn wal_mode_is_active() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("wal.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let mode: String = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                let m = conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))?;
                Ok(m)
            })
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");

        db.close().await.unwrap();
    }
}
