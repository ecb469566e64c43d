// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback record operations.

use rusqlite::params;
use tellbox_core::TellboxError;
use tracing::debug;

use crate::database::Database;
use crate::models::{FeedbackPage, FeedbackRecord, NewFeedback, SortDirection};

/// ISO-8601 UTC with millisecond precision. Fixed width, so lexicographic
/// order equals chronological order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Insert a new feedback record. Returns the full persisted record with
/// its assigned id and creation timestamp.
///
/// Schema CHECK constraints (non-blank text fields, rating in 1..=5) are
/// the last line of defense; violations surface as storage errors.
pub async fn insert(db: &Database, new: &NewFeedback) -> Result<FeedbackRecord, TellboxError> {
    let row = new.clone();
    let created_at = chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string();

    let insert_row = row.clone();
    let insert_created_at = created_at.clone();
    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO feedback (name, email, phone, rating, feedback, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    insert_row.name,
                    insert_row.email,
                    insert_row.phone,
                    insert_row.rating,
                    insert_row.feedback,
                    insert_created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    debug!(id, "feedback record inserted");
    Ok(FeedbackRecord {
        id,
        name: row.name,
        email: row.email,
        phone: row.phone,
        rating: row.rating,
        feedback: row.feedback,
        created_at,
    })
}

/// Return one page of feedback records plus the unfiltered total count.
///
/// Ordered by `(created_at, id)` in the given direction; id breaks ties
/// between identical timestamps, keeping pagination deterministic. The
/// count and the page run in the same serialized connection call, so the
/// pair is mutually consistent. An offset at or past the end yields an
/// empty page.
pub async fn list(
    db: &Database,
    offset: i64,
    limit: i64,
    sort: SortDirection,
) -> Result<FeedbackPage, TellboxError> {
    db.connection()
        .call(move |conn| {
            let total: i64 =
                conn.query_row("SELECT COUNT(*) FROM feedback", [], |row| row.get(0))?;

            let mut items = Vec::new();
            match sort {
                SortDirection::Ascending => {
                    let mut stmt = conn.prepare(
                        "SELECT id, name, email, phone, rating, feedback, created_at
                         FROM feedback
                         ORDER BY created_at ASC, id ASC
                         LIMIT ?1 OFFSET ?2",
                    )?;
                    let rows = stmt.query_map(params![limit, offset], |row| {
                        Ok(FeedbackRecord {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                            phone: row.get(3)?,
                            rating: row.get(4)?,
                            feedback: row.get(5)?,
                            created_at: row.get(6)?,
                        })
                    })?;
                    for row in rows {
                        items.push(row?);
                    }
                }
                SortDirection::Descending => {
                    let mut stmt = conn.prepare(
                        "SELECT id, name, email, phone, rating, feedback, created_at
                         FROM feedback
                         ORDER BY created_at DESC, id DESC
                         LIMIT ?1 OFFSET ?2",
                    )?;
                    let rows = stmt.query_map(params![limit, offset], |row| {
                        Ok(FeedbackRecord {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                            phone: row.get(3)?,
                            rating: row.get(4)?,
                            feedback: row.get(5)?,
                            created_at: row.get(6)?,
                        })
                    })?;
                    for row in rows {
                        items.push(row?);
                    }
                }
            }
            Ok(FeedbackPage { items, total })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_feedback(name: &str, rating: i64) -> NewFeedback {
        NewFeedback {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+1 555 0100".to_string(),
            rating,
            feedback: format!("{name} thought the service was worth {rating} stars"),
        }
    }

    /// Seed a row with an explicit timestamp, bypassing the wall clock so
    /// ordering tests are deterministic.
    async fn seed(db: &Database, name: &str, rating: i64, created_at: &str) -> i64 {
        let new = make_feedback(name, rating);
        let created_at = created_at.to_string();
        db.connection()
            .call(move |conn| -> Result<i64, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO feedback (name, email, phone, rating, feedback, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![new.name, new.email, new.phone, new.rating, new.feedback, created_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn insert_returns_full_record() {
        let (db, _dir) = setup_db().await;

        let new = make_feedback("Ann", 5);
        let record = insert(&db, &new).await.unwrap();

        assert!(record.id > 0);
        assert_eq!(record.name, "Ann");
        assert_eq!(record.email, "ann@example.com");
        assert_eq!(record.phone, "+1 555 0100");
        assert_eq!(record.rating, 5);
        assert_eq!(record.feedback, new.feedback);
        // e.g. 2026-01-05T15:04:00.123Z
        assert_eq!(record.created_at.len(), 24);
        assert!(record.created_at.ends_with('Z'));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let (db, _dir) = setup_db().await;

        let first = insert(&db, &make_feedback("Ann", 5)).await.unwrap();
        let second = insert(&db, &make_feedback("Bob", 3)).await.unwrap();
        let third = insert(&db, &make_feedback("Cid", 1)).await.unwrap();

        assert!(first.id < second.id);
        assert!(second.id < third.id);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn insert_persists_exactly_one_row() {
        let (db, _dir) = setup_db().await;

        insert(&db, &make_feedback("Ann", 4)).await.unwrap();

        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                let n = conn.query_row("SELECT COUNT(*) FROM feedback", [], |row| row.get(0))?;
                Ok(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn out_of_range_rating_violates_check_constraint() {
        let (db, _dir) = setup_db().await;

        let result = insert(&db, &make_feedback("Ann", 7)).await;
        assert!(result.is_err(), "rating 7 should violate the CHECK constraint");

        let result = insert(&db, &make_feedback("Bob", 0)).await;
        assert!(result.is_err(), "rating 0 should violate the CHECK constraint");

        // Nothing was persisted.
        let page = list(&db, 0, 10, SortDirection::Descending).await.unwrap();
        assert_eq!(page.total, 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn blank_name_violates_check_constraint() {
        let (db, _dir) = setup_db().await;

        let mut new = make_feedback("Ann", 4);
        new.name = "   ".to_string();
        let result = insert(&db, &new).await;
        assert!(result.is_err(), "whitespace-only name should violate CHECK");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_empty_table() {
        let (db, _dir) = setup_db().await;

        let page = list(&db, 0, 10, SortDirection::Descending).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn descending_returns_newest_first() {
        let (db, _dir) = setup_db().await;

        seed(&db, "Ann", 5, "2026-01-01T10:00:00.000Z").await;
        seed(&db, "Bob", 3, "2026-01-02T10:00:00.000Z").await;
        seed(&db, "Cid", 4, "2026-01-03T10:00:00.000Z").await;

        let page = list(&db, 0, 10, SortDirection::Descending).await.unwrap();
        assert_eq!(page.total, 3);
        let names: Vec<&str> = page.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cid", "Bob", "Ann"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn ascending_returns_oldest_first() {
        let (db, _dir) = setup_db().await;

        seed(&db, "Ann", 5, "2026-01-01T10:00:00.000Z").await;
        seed(&db, "Bob", 3, "2026-01-02T10:00:00.000Z").await;
        seed(&db, "Cid", 4, "2026-01-03T10:00:00.000Z").await;

        let page = list(&db, 0, 10, SortDirection::Ascending).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cid"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn identical_timestamps_tie_break_on_id() {
        let (db, _dir) = setup_db().await;

        // Same created_at for all three; ids decide the order.
        let a = seed(&db, "Ann", 5, "2026-01-01T10:00:00.000Z").await;
        let b = seed(&db, "Bob", 3, "2026-01-01T10:00:00.000Z").await;
        let c = seed(&db, "Cid", 4, "2026-01-01T10:00:00.000Z").await;

        let asc = list(&db, 0, 10, SortDirection::Ascending).await.unwrap();
        let asc_ids: Vec<i64> = asc.items.iter().map(|r| r.id).collect();
        assert_eq!(asc_ids, vec![a, b, c]);

        let desc = list(&db, 0, 10, SortDirection::Descending).await.unwrap();
        let desc_ids: Vec<i64> = desc.items.iter().map(|r| r.id).collect();
        assert_eq!(desc_ids, vec![c, b, a]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn offset_skips_exactly_offset_records() {
        let (db, _dir) = setup_db().await;

        for i in 0..5 {
            seed(
                &db,
                &format!("User{i}"),
                3,
                &format!("2026-01-0{}T10:00:00.000Z", i + 1),
            )
            .await;
        }

        // Ascending pages of 2: [User0, User1], [User2, User3], [User4].
        let page0 = list(&db, 0, 2, SortDirection::Ascending).await.unwrap();
        assert_eq!(page0.items[0].name, "User0");
        assert_eq!(page0.items[1].name, "User1");

        let page1 = list(&db, 2, 2, SortDirection::Ascending).await.unwrap();
        assert_eq!(page1.items[0].name, "User2");
        assert_eq!(page1.items[1].name, "User3");

        let page2 = list(&db, 4, 2, SortDirection::Ascending).await.unwrap();
        assert_eq!(page2.items.len(), 1);
        assert_eq!(page2.items[0].name, "User4");

        // Total is invariant across pages.
        assert_eq!(page0.total, 5);
        assert_eq!(page1.total, 5);
        assert_eq!(page2.total, 5);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn offset_past_end_yields_empty_page() {
        let (db, _dir) = setup_db().await;

        seed(&db, "Ann", 5, "2026-01-01T10:00:00.000Z").await;
        seed(&db, "Bob", 3, "2026-01-02T10:00:00.000Z").await;

        let page = list(&db, 50, 10, SortDirection::Descending).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn limit_caps_returned_items() {
        let (db, _dir) = setup_db().await;

        for i in 0..4 {
            seed(
                &db,
                &format!("User{i}"),
                2,
                &format!("2026-01-0{}T10:00:00.000Z", i + 1),
            )
            .await;
        }

        let page = list(&db, 0, 3, SortDirection::Descending).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 4);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_inserts_no_sqlite_busy() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("concurrent.db");
        let db = std::sync::Arc::new(Database::open(db_path.to_str().unwrap()).await.unwrap());

        let mut handles = Vec::new();
        for i in 0..10i64 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                insert(&db, &make_feedback(&format!("User{i}"), 1 + (i % 5))).await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            let record = handle.await.unwrap().unwrap();
            ids.push(record.id);
        }

        // All ids are distinct and all rows landed.
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);

        let page = list(&db, 0, 100, SortDirection::Ascending).await.unwrap();
        assert_eq!(page.total, 10);
    }
}
