// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only audit log operations.

use agrisync_core::{AgrisyncError, LogEntry};
use rusqlite::params;

use crate::database::Database;

/// Append a free-text event. Entries are immutable once written.
pub async fn append(db: &Database, event: &str) -> Result<(), AgrisyncError> {
    let event = event.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO offline_log (event) VALUES (?1)",
                params![event],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The most recent entries, newest first.
pub async fn recent(db: &Database, limit: i64) -> Result<Vec<LogEntry>, AgrisyncError> {
    db.connection()
        .call(move |conn| -> Result<Vec<LogEntry>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, event, created_at FROM offline_log
                 ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(LogEntry {
                    id: row.get(0)?,
                    event: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
