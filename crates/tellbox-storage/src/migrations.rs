// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema migrations, embedded at build time.
//!
//! `embed_migrations!` compiles everything under `migrations/` into the
//! binary; [`run_migrations`] applies whatever is pending when the
//! database opens.

use tellbox_core::TellboxError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply pending migrations.
///
/// Already-applied versions are recorded by refinery in its
/// `refinery_schema_history` table and skipped.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), TellboxError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| TellboxError::Storage {
            source: Box::new(e),
        })?;
    Ok(())
}
