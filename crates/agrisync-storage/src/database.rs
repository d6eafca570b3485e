// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::{Path, PathBuf};

use agrisync_core::AgrisyncError;
use tracing::debug;

use crate::migrations;

/// Handle to the offline SQLite database.
///
/// Wraps a single `tokio_rusqlite::Connection`; query modules accept
/// `&Database` and go through [`Database::connection`].
pub struct Database {
    conn: tokio_rusqlite::Connection,
    path: PathBuf,
}

impl Database {
    /// Open (or create) the database at `path` and bring the schema up to
    /// date.
    ///
    /// Safe to call on an existing file: refinery's schema history applies
    /// only migrations that have not run yet, so repeated opens never
    /// clobber data.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, AgrisyncError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| AgrisyncError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path.to_string())
            .await
            .map_err(|e| AgrisyncError::Storage {
                source: Box::new(e),
            })?;

        let journal_mode = if wal_mode { "WAL" } else { "DELETE" };
        let pragmas = format!(
            "PRAGMA journal_mode = {journal_mode};
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;"
        );
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(&pragmas)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| AgrisyncError::Storage {
                source: e.to_string().into(),
            })?;

        debug!(path = %path, wal = wal_mode, "offline database opened");
        Ok(Self {
            conn,
            path: PathBuf::from(path),
        })
    }

    /// Returns the shared connection handle.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Filesystem path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checkpoint the WAL so pending writes land in the main database file.
    pub async fn close(&self) -> Result<(), AgrisyncError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Convert tokio-rusqlite errors to AgrisyncError::Storage.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> AgrisyncError {
    AgrisyncError::Storage {
        source: Box::new(e),
    }
}
