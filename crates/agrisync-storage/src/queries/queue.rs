// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sync queue operations.
//!
//! Records are inserted once at enqueue time, read during drains, and
//! deleted on delivery. Nothing here mutates a row in place.

use std::str::FromStr;

use agrisync_core::{ActionKind, AgrisyncError, QueueRecord, SyncStatus};
use rusqlite::params;

use crate::database::Database;

/// Insert a new queue record.
pub async fn insert(db: &Database, record: &QueueRecord) -> Result<(), AgrisyncError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO sync_queue
                     (id, kind, payload, content_hash, priority, status, retry_count, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.kind.to_string(),
                    record.payload,
                    record.content_hash,
                    record.priority,
                    record.status.to_string(),
                    record.retry_count,
                    record.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All undelivered records, most urgent first.
///
/// Returns rows with status `pending` or `retrying`, ordered by ascending
/// priority with ties broken by capture time.
pub async fn pending_ordered(db: &Database) -> Result<Vec<QueueRecord>, AgrisyncError> {
    db.connection()
        .call(|conn| -> Result<Vec<QueueRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, kind, payload, content_hash, priority, status, retry_count, created_at
                 FROM sync_queue
                 WHERE status IN ('pending', 'retrying')
                 ORDER BY priority ASC, created_at ASC",
            )?;
            let rows = stmt.query_map([], row_to_record)?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a record by id.
///
/// Idempotent: deleting an id that is already absent succeeds and returns
/// `false`, supporting cleanup after a race.
pub async fn delete(db: &Database, id: &str) -> Result<bool, AgrisyncError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let affected = conn.execute("DELETE FROM sync_queue WHERE id = ?1", params![id])?;
            Ok(affected > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Number of rows currently in the queue, regardless of status.
pub async fn count(db: &Database) -> Result<i64, AgrisyncError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM sync_queue", [], |row| row.get(0))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn row_to_record(row: &rusqlite::Row<'_>) -> Result<QueueRecord, rusqlite::Error> {
    let kind_raw: String = row.get(1)?;
    let status_raw: String = row.get(5)?;
    let status = SyncStatus::from_str(&status_raw).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Text,
            format!("unknown sync status `{status_raw}`").into(),
        )
    })?;

    Ok(QueueRecord {
        id: row.get(0)?,
        // The default variant absorbs tags from other app versions.
        kind: ActionKind::from_str(&kind_raw).unwrap_or(ActionKind::Other(kind_raw)),
        payload: row.get(2)?,
        content_hash: row.get(3)?,
        priority: row.get(4)?,
        status,
        retry_count: row.get(6)?,
        created_at: row.get(7)?,
    })
}
