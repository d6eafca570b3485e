// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-through cache of server-sourced snapshots for offline display.

use agrisync_core::AgrisyncError;
use rusqlite::params;

use crate::database::Database;

/// Store a snapshot under `key`, replacing any previous value wholesale.
pub async fn put(
    db: &Database,
    key: &str,
    value: &serde_json::Value,
) -> Result<(), AgrisyncError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT OR REPLACE INTO data_cache (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Read the snapshot stored under `key`, if any.
pub async fn get(db: &Database, key: &str) -> Result<Option<serde_json::Value>, AgrisyncError> {
    let key = key.to_string();
    let raw = db
        .connection()
        .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
            let result = conn.query_row(
                "SELECT value FROM data_cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            );
            match result {
                Ok(value) => Ok(Some(value)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match raw {
        Some(text) => {
            let value = serde_json::from_str(&text).map_err(|e| AgrisyncError::Storage {
                source: Box::new(e),
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn put_and_get_roundtrips() {
        let (db, _dir) = setup_db().await;
        let missions = serde_json::json!([
            {"id": 101, "task": "Check soil moisture"},
            {"id": 102, "task": "Clean irrigation filters"},
        ]);

        put(&db, "missions_user-1", &missions).await.unwrap();
        let cached = get(&db, "missions_user-1").await.unwrap();
        assert_eq!(cached, Some(missions));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get(&db, "nothing-here").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn put_overwrites_wholesale() {
        let (db, _dir) = setup_db().await;

        put(&db, "alerts", &serde_json::json!(["rain warning"]))
            .await
            .unwrap();
        put(&db, "alerts", &serde_json::json!(["frost warning"]))
            .await
            .unwrap();

        let cached = get(&db, "alerts").await.unwrap().unwrap();
        assert_eq!(cached, serde_json::json!(["frost warning"]));

        db.close().await.unwrap();
    }
}
