// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the durable offline store.

use async_trait::async_trait;

use crate::error::AgrisyncError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{LogEntry, QueueRecord, StorageUsage};

/// Adapter for the durable, quota-enforced offline store.
///
/// The store owns three logical tables: the sync queue, an append-only
/// audit log, and a generic read-through cache. Queue records belong to
/// the store; the queue manager only borrows them for the duration of a
/// drain iteration.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    ///
    /// Idempotent with respect to existing data: the schema is versioned
    /// and upgraded in place, never clobbered.
    async fn initialize(&self) -> Result<(), AgrisyncError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), AgrisyncError>;

    /// Current storage accounting, reconciled against the configured ceiling.
    async fn estimate_usage(&self) -> Result<StorageUsage, AgrisyncError>;

    /// Durably persists a new queue record.
    ///
    /// Fails with [`AgrisyncError::StorageExceeded`] when the effective
    /// storage limit is already exceeded at call time.
    async fn insert_record(&self, record: &QueueRecord) -> Result<(), AgrisyncError>;

    /// All records with status `pending` or `retrying`, ordered by
    /// ascending priority, ties broken by ascending capture time.
    async fn pending_records(&self) -> Result<Vec<QueueRecord>, AgrisyncError>;

    /// Removes a record by identity. Deleting an absent id is a no-op,
    /// not an error; returns whether a row was actually removed.
    async fn delete_record(&self, id: &str) -> Result<bool, AgrisyncError>;

    /// Appends a free-text event to the audit log.
    async fn append_log(&self, event: &str) -> Result<(), AgrisyncError>;

    /// The most recent audit log entries, newest first.
    async fn recent_logs(&self, limit: i64) -> Result<Vec<LogEntry>, AgrisyncError>;

    /// Overwrites the cached snapshot stored under `key`.
    async fn cache_put(&self, key: &str, value: &serde_json::Value)
        -> Result<(), AgrisyncError>;

    /// Reads the cached snapshot stored under `key`, if any.
    async fn cache_get(&self, key: &str) -> Result<Option<serde_json::Value>, AgrisyncError>;

    /// Wipes the queue and log tables in a single transaction.
    ///
    /// Used for logout/reset. Either both tables clear or the call fails
    /// as a whole; it never half-clears silently.
    async fn clear_all(&self) -> Result<(), AgrisyncError>;
}
