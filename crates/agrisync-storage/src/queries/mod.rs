// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per logical table.

pub mod cache;
pub mod log;
pub mod queue;

use agrisync_core::AgrisyncError;

use crate::database::Database;

/// Wipe the queue and log tables in a single transaction.
///
/// Used for logout/reset. The transaction makes the wipe all-or-nothing;
/// cached server snapshots are left in place.
pub async fn clear_all(db: &Database) -> Result<(), AgrisyncError> {
    db.connection()
        .call(|conn| -> Result<(), rusqlite::Error> {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM sync_queue", [])?;
            tx.execute("DELETE FROM offline_log", [])?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
