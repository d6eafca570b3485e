// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch adapter trait for delivering decrypted actions to the backend.

use async_trait::async_trait;

use crate::error::AgrisyncError;
use crate::payload::ActionPayload;
use crate::traits::adapter::PluginAdapter;
use crate::types::DispatchOutcome;

/// Adapter translating one decrypted action into its remote call.
///
/// Each known action kind maps to a fixed remote operation with its own
/// required field shape. A thrown transport error or non-success response
/// is a dispatch failure; the queue manager keeps the record for retry.
#[async_trait]
pub trait DispatchAdapter: PluginAdapter {
    /// Delivers one action. Returns [`DispatchOutcome::Skipped`] for an
    /// unrecognized kind instead of failing the batch.
    async fn dispatch(&self, payload: &ActionPayload) -> Result<DispatchOutcome, AgrisyncError>;
}
