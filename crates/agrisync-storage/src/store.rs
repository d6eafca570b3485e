// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use agrisync_config::StorageConfig;
use agrisync_core::{
    AdapterType, AgrisyncError, HealthStatus, LogEntry, PluginAdapter, QueueRecord,
    StorageAdapter, StorageUsage,
};

use crate::database::Database;
use crate::queries;
use crate::usage;

/// SQLite-backed offline store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, AgrisyncError> {
        self.db.get().ok_or_else(|| AgrisyncError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, AgrisyncError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), AgrisyncError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStore {
    async fn initialize(&self) -> Result<(), AgrisyncError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| AgrisyncError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), AgrisyncError> {
        self.db()?.close().await
    }

    async fn estimate_usage(&self) -> Result<StorageUsage, AgrisyncError> {
        let db = self.db()?;
        Ok(usage::estimate_usage(
            db.path(),
            self.config.max_storage_bytes,
        ))
    }

    async fn insert_record(&self, record: &QueueRecord) -> Result<(), AgrisyncError> {
        let current = self.estimate_usage().await?;
        if current.is_exceeded {
            return Err(AgrisyncError::StorageExceeded {
                used_bytes: current.used_bytes,
                limit_bytes: current.limit_bytes,
            });
        }
        if current.is_near_limit {
            warn!(
                used_bytes = current.used_bytes,
                limit_bytes = current.limit_bytes,
                "offline storage is over 90% full"
            );
        }
        queries::queue::insert(self.db()?, record).await
    }

    async fn pending_records(&self) -> Result<Vec<QueueRecord>, AgrisyncError> {
        queries::queue::pending_ordered(self.db()?).await
    }

    async fn delete_record(&self, id: &str) -> Result<bool, AgrisyncError> {
        queries::queue::delete(self.db()?, id).await
    }

    async fn append_log(&self, event: &str) -> Result<(), AgrisyncError> {
        queries::log::append(self.db()?, event).await
    }

    async fn recent_logs(&self, limit: i64) -> Result<Vec<LogEntry>, AgrisyncError> {
        queries::log::recent(self.db()?, limit).await
    }

    async fn cache_put(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), AgrisyncError> {
        queries::cache::put(self.db()?, key, value).await
    }

    async fn cache_get(&self, key: &str) -> Result<Option<serde_json::Value>, AgrisyncError> {
        queries::cache::get(self.db()?, key).await
    }

    async fn clear_all(&self) -> Result<(), AgrisyncError> {
        queries::clear_all(self.db()?).await
    }
}
