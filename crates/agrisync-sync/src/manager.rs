// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The offline queue manager: enqueue, drain, and the read-side API.
//!
//! One `SyncQueue` instance owns the drain exclusivity flag and borrows
//! records from the store only for the duration of a drain iteration. A
//! failed dispatch leaves the record exactly as it was; the next drain
//! picks it up again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use agrisync_core::{
    ActionKind, ActionPayload, AgrisyncError, ConnectivityProbe, DispatchAdapter,
    DispatchOutcome, Priority, QueueRecord, StorageAdapter, StorageUsage, SyncStatus,
};
use agrisync_crypto::{content_digest, PayloadCipher};

/// Aggregate result of one completed drain pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// What a call to [`SyncQueue::drain`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// A pass ran over the records captured at drain start.
    Ran(DrainReport),
    /// Another drain already held the exclusivity flag.
    SkippedBusy,
    /// The connectivity probe reported the backend unreachable.
    SkippedOffline,
}

/// Display-safe view of one queued action. Payloads stay encrypted.
#[derive(Debug, Clone)]
pub struct PendingAction {
    pub id: String,
    pub kind: ActionKind,
    pub priority: i64,
    pub retry_count: i64,
    pub created_at: String,
}

/// The offline action queue manager.
///
/// Explicitly constructed with its collaborators injected; its lifecycle is
/// tied to application start/stop rather than any global state.
pub struct SyncQueue {
    store: Arc<dyn StorageAdapter>,
    cipher: PayloadCipher,
    dispatcher: Arc<dyn DispatchAdapter>,
    connectivity: Arc<dyn ConnectivityProbe>,
    draining: AtomicBool,
}

/// Releases the drain exclusivity flag when the pass ends, no matter how.
struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SyncQueue {
    pub fn new(
        store: Arc<dyn StorageAdapter>,
        cipher: PayloadCipher,
        dispatcher: Arc<dyn DispatchAdapter>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            store,
            cipher,
            dispatcher,
            connectivity,
            draining: AtomicBool::new(false),
        }
    }

    /// Capture an action for eventual delivery. Returns the new record id.
    ///
    /// The payload is hashed and encrypted before it touches the store. A
    /// storage ceiling rejection or encryption failure aborts the whole
    /// operation with nothing persisted; an action is never silently
    /// dropped.
    pub async fn enqueue(
        &self,
        payload: ActionPayload,
        priority: Priority,
    ) -> Result<String, AgrisyncError> {
        let plaintext = payload
            .to_value()
            .map_err(|e| AgrisyncError::Encryption(format!("payload serialization failed: {e}")))?;

        let id = Uuid::new_v4().to_string();
        let content_hash = content_digest(&plaintext);
        let sealed = self.cipher.seal_value(&plaintext)?;

        let record = QueueRecord {
            id: id.clone(),
            kind: payload.kind(),
            payload: sealed,
            content_hash,
            priority: priority.as_i64(),
            status: SyncStatus::Pending,
            retry_count: 0,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.store.insert_record(&record).await?;
        self.store
            .append_log(&format!("queued {} ({})", record.kind, short_id(&id)))
            .await?;

        debug!(id = %id, kind = %record.kind, priority = record.priority, "offline action queued");
        Ok(id)
    }

    /// Attempt to deliver every currently pending record, most urgent first.
    ///
    /// No-op when a drain is already running or the backend is unreachable.
    /// Each record is processed independently; one failure never aborts the
    /// batch, and the pass always completes and reports only aggregates.
    /// Records enqueued after the pass starts wait for the next invocation.
    pub async fn drain(&self) -> DrainOutcome {
        if self.draining.swap(true, Ordering::SeqCst) {
            debug!("drain already in progress, skipping");
            return DrainOutcome::SkippedBusy;
        }
        let _guard = DrainGuard(&self.draining);

        if !self.connectivity.is_online().await {
            debug!("backend unreachable, skipping drain");
            return DrainOutcome::SkippedOffline;
        }

        let records = match self.store.pending_records().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "could not read pending records, aborting drain pass");
                return DrainOutcome::Ran(DrainReport::default());
            }
        };

        if records.is_empty() {
            debug!("nothing to sync");
            return DrainOutcome::Ran(DrainReport::default());
        }

        info!(count = records.len(), "starting offline sync pass");
        let mut report = DrainReport::default();

        for record in records {
            report.attempted += 1;
            match self.deliver(&record).await {
                Ok(DispatchOutcome::Delivered) => report.delivered += 1,
                Ok(DispatchOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    warn!(
                        id = %record.id,
                        kind = %record.kind,
                        error = %e,
                        "sync failed, record retained for next drain"
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            delivered = report.delivered,
            failed = report.failed,
            skipped = report.skipped,
            "offline sync pass complete"
        );
        DrainOutcome::Ran(report)
    }

    /// Decrypt, dispatch, and on success remove one record.
    async fn deliver(&self, record: &QueueRecord) -> Result<DispatchOutcome, AgrisyncError> {
        let plaintext = self.cipher.open_value(&record.payload)?;
        let payload = ActionPayload::from_value(&record.kind, plaintext)
            .map_err(|e| AgrisyncError::Decryption(format!("payload shape mismatch: {e}")))?;

        match self.dispatcher.dispatch(&payload).await? {
            DispatchOutcome::Delivered => {
                self.store.delete_record(&record.id).await?;
                if let Err(e) = self
                    .store
                    .append_log(&format!("synced {} ({})", record.kind, short_id(&record.id)))
                    .await
                {
                    warn!(id = %record.id, error = %e, "delivered but audit log append failed");
                }
                debug!(id = %record.id, kind = %record.kind, "record synced and removed");
                Ok(DispatchOutcome::Delivered)
            }
            DispatchOutcome::Skipped => {
                warn!(id = %record.id, kind = %record.kind, "no dispatch behavior for kind, record left queued");
                Ok(DispatchOutcome::Skipped)
            }
        }
    }

    /// Drain-safe snapshot of undelivered actions for display.
    pub async fn pending_actions(&self) -> Result<Vec<PendingAction>, AgrisyncError> {
        let records = self.store.pending_records().await?;
        Ok(records
            .into_iter()
            .map(|r| PendingAction {
                id: r.id,
                kind: r.kind,
                priority: r.priority,
                retry_count: r.retry_count,
                created_at: r.created_at,
            })
            .collect())
    }

    /// Current storage accounting for the offline store.
    pub async fn storage_usage(&self) -> Result<StorageUsage, AgrisyncError> {
        self.store.estimate_usage().await
    }

    /// Wipe the queue and audit log (logout/reset).
    pub async fn clear_all(&self) -> Result<(), AgrisyncError> {
        self.store.clear_all().await?;
        info!("offline queue and audit log cleared");
        Ok(())
    }
}

/// First eight characters of a record id, for audit log lines.
fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}
