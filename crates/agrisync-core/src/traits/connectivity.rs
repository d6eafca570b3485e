// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connectivity probe consulted before each drain pass.

use async_trait::async_trait;

/// Reports whether the backend is currently reachable.
///
/// Connectivity transitions are the expected external trigger for a drain,
/// but the queue manager re-checks at drain entry to guard against stale
/// triggers.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync + 'static {
    async fn is_online(&self) -> bool;
}
