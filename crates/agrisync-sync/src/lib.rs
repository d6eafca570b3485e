// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline queue manager for the AgriSync offline core.
//!
//! Orchestrates the durable store, the crypto boundary, and the dispatch
//! adapter: actions are captured encrypted while disconnected, then drained
//! to the backend in priority order once connectivity returns.

pub mod manager;

pub use manager::{DrainOutcome, DrainReport, PendingAction, SyncQueue};
