// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the AgriSync offline core.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::payload::ActionKind;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter in the plugin registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Dispatch,
}

/// Persisted state of a queued action.
///
/// Delivery is terminal: a successfully dispatched record is deleted rather
/// than kept in a `synced` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SyncStatus {
    /// Captured, not yet confirmed delivered.
    Pending,
    /// Previously attempted and still awaiting delivery.
    Retrying,
}

/// Urgency class of a queued action. Lower value drains first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Critical safety report (disaster, emergency).
    Emergency = 1,
    /// Value-bearing proof of completed work.
    MissionProof = 2,
    /// Administrative request to support staff.
    Ticket = 3,
    /// Social content.
    Community = 4,
    /// Background telemetry.
    Telemetry = 5,
}

impl Priority {
    /// Numeric form stored in the queue table.
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    /// The conventional urgency class for an action kind.
    pub fn for_kind(kind: &ActionKind) -> Self {
        match kind {
            ActionKind::EmergencyReport => Priority::Emergency,
            ActionKind::MissionProof => Priority::MissionProof,
            ActionKind::SupportTicket => Priority::Ticket,
            ActionKind::CommunityPost => Priority::Community,
            ActionKind::Other(_) => Priority::Telemetry,
        }
    }
}

/// One row of the durable sync queue.
///
/// The record is created exactly once at enqueue time, never mutated in
/// place, and deleted exactly once on dispatch success. `payload` is the
/// opaque encrypted envelope; the store never sees plaintext.
#[derive(Debug, Clone)]
pub struct QueueRecord {
    /// UUID v4, assigned at enqueue time. Primary key, used for idempotent deletion.
    pub id: String,
    /// Action type tag selecting the dispatch adapter behavior.
    pub kind: ActionKind,
    /// Encrypted payload envelope (base64, nonce prepended).
    pub payload: String,
    /// SHA-256 hex digest of the plaintext payload, for duplicate/conflict detection.
    pub content_hash: String,
    /// Urgency class, 1 (highest) to 5 (lowest).
    pub priority: i64,
    pub status: SyncStatus,
    /// Attempts so far. Informational; the base drain flow never increments it.
    pub retry_count: i64,
    /// RFC 3339 capture timestamp. Informative ordering only, not authoritative.
    pub created_at: String,
}

/// One row of the append-only offline audit log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub event: String,
    pub created_at: String,
}

/// Local storage accounting, reconciled against the configured hard ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageUsage {
    pub used_bytes: u64,
    /// The effective limit: the smaller of the runtime quota and the configured ceiling.
    pub limit_bytes: u64,
    pub percentage: f64,
    /// True at 90% of the effective limit.
    pub is_near_limit: bool,
    pub is_exceeded: bool,
}

/// Result of handing one decrypted action to the dispatch adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The remote operation accepted the action; the record can be deleted.
    Delivered,
    /// No adapter behavior exists for this action kind; the record stays queued.
    Skipped,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn sync_status_roundtrips_through_strings() {
        assert_eq!(SyncStatus::Pending.to_string(), "pending");
        assert_eq!(SyncStatus::Retrying.to_string(), "retrying");
        assert_eq!(SyncStatus::from_str("pending").unwrap(), SyncStatus::Pending);
        assert_eq!(SyncStatus::from_str("retrying").unwrap(), SyncStatus::Retrying);
        assert!(SyncStatus::from_str("synced").is_err());
    }

    #[test]
    fn priority_orders_emergency_first() {
        assert!(Priority::Emergency < Priority::MissionProof);
        assert!(Priority::MissionProof < Priority::Ticket);
        assert!(Priority::Ticket < Priority::Community);
        assert!(Priority::Community < Priority::Telemetry);
        assert_eq!(Priority::Emergency.as_i64(), 1);
        assert_eq!(Priority::Telemetry.as_i64(), 5);
    }

    #[test]
    fn default_priority_tracks_action_kind() {
        assert_eq!(
            Priority::for_kind(&ActionKind::EmergencyReport),
            Priority::Emergency
        );
        assert_eq!(
            Priority::for_kind(&ActionKind::Other("FUTURE_THING".into())),
            Priority::Telemetry
        );
    }
}
