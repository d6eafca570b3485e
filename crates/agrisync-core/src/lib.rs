// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the AgriSync offline-first synchronization core.
//!
//! This crate provides the foundational trait definitions, error type, and
//! common types used throughout the AgriSync workspace: the durable queue
//! record model, the typed action payload union with its uniform binary
//! attachment codec, and the adapter seams implemented by the storage and
//! dispatch crates.

pub mod error;
pub mod payload;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AgrisyncError;
pub use payload::{ActionKind, ActionPayload, Attachment, GeoPoint};
pub use types::{
    AdapterType, DispatchOutcome, HealthStatus, LogEntry, Priority, QueueRecord, StorageUsage,
    SyncStatus,
};

// Re-export all adapter traits at crate root.
pub use traits::{ConnectivityProbe, DispatchAdapter, PluginAdapter, StorageAdapter};
