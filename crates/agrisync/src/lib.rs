// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline-first synchronization core for the AgriSync farmer-engagement app.
//!
//! Wires the configured storage, crypto, and dispatch components into one
//! [`OfflineCore`] whose lifecycle the host application owns: construct it
//! at startup, hand its [`SyncQueue`] to capture/display code, call
//! [`OfflineCore::shutdown`] on exit.
//!
//! ```no_run
//! use agrisync::OfflineCore;
//! use agrisync_config::load_and_validate;
//! use agrisync_core::{ActionPayload, Priority};
//! use agrisync_core::payload::SupportTicket;
//!
//! # async fn run() -> Result<(), agrisync_core::AgrisyncError> {
//! let config = load_and_validate().expect("config errors");
//! let core = OfflineCore::start(config).await?;
//!
//! core.queue()
//!     .enqueue(
//!         ActionPayload::SupportTicket(SupportTicket {
//!             category: "equipment".into(),
//!             description: "pump is leaking".into(),
//!             photo: None,
//!         }),
//!         Priority::Ticket,
//!     )
//!     .await?;
//!
//! // Later, when connectivity returns:
//! core.queue().drain().await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::info;

use agrisync_config::AgrisyncConfig;
use agrisync_core::{AgrisyncError, PluginAdapter, StorageAdapter};
use agrisync_crypto::PayloadCipher;
use agrisync_dispatch::{HttpConnectivityProbe, HttpDispatcher};
use agrisync_storage::SqliteStore;
use agrisync_sync::SyncQueue;

pub use agrisync_core::{ActionKind, ActionPayload, Attachment, Priority};
pub use agrisync_sync::{DrainOutcome, DrainReport, PendingAction};

/// The assembled offline core: store, cipher, dispatcher, and queue manager.
pub struct OfflineCore {
    queue: Arc<SyncQueue>,
    store: Arc<SqliteStore>,
}

impl OfflineCore {
    /// Open the offline store and assemble the queue manager from `config`.
    pub async fn start(config: AgrisyncConfig) -> Result<Self, AgrisyncError> {
        let store = Arc::new(SqliteStore::new(config.storage.clone()));
        store.initialize().await?;

        let cipher = PayloadCipher::from_config(&config.crypto)?;
        let dispatcher = Arc::new(HttpDispatcher::new(&config.api)?);
        let connectivity = Arc::new(HttpConnectivityProbe::new(&config.api)?);

        let queue = Arc::new(SyncQueue::new(
            store.clone(),
            cipher,
            dispatcher,
            connectivity,
        ));

        info!("offline core started");
        Ok(Self { queue, store })
    }

    /// The queue manager: enqueue, drain, and the read-side API.
    pub fn queue(&self) -> &SyncQueue {
        &self.queue
    }

    /// A shareable handle to the queue manager.
    pub fn queue_handle(&self) -> Arc<SyncQueue> {
        Arc::clone(&self.queue)
    }

    /// Direct access to the store for cache reads/writes.
    pub fn store(&self) -> &Arc<SqliteStore> {
        &self.store
    }

    /// Flush and release the offline store.
    pub async fn shutdown(&self) -> Result<(), AgrisyncError> {
        self.store.shutdown().await?;
        info!("offline core stopped");
        Ok(())
    }
}
