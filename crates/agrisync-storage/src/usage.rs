// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local storage accounting against the configured hard ceiling.
//!
//! Used bytes are what the database actually occupies on disk (main file
//! plus WAL and shared-memory sidecars). The runtime quota is what the
//! containing disk could still hold; the effective limit is the smaller of
//! that quota and the application ceiling, so a nearly-full device tightens
//! the limit below the configured 500 MB.

use std::path::Path;

use agrisync_core::StorageUsage;
use sysinfo::Disks;

/// Fraction of the effective limit at which `is_near_limit` trips.
const NEAR_LIMIT_RATIO: f64 = 0.9;

/// Measure current usage for the database at `db_path` against
/// `ceiling_bytes`.
///
/// Filesystem probing is best-effort: files that do not exist yet count as
/// zero, and when no disk can be matched the configured ceiling stands
/// alone as the limit.
pub fn estimate_usage(db_path: &Path, ceiling_bytes: u64) -> StorageUsage {
    let used_bytes = database_footprint(db_path);

    let limit_bytes = match disk_quota(db_path, used_bytes) {
        Some(quota) => quota.min(ceiling_bytes),
        None => ceiling_bytes,
    };

    let percentage = if limit_bytes == 0 {
        100.0
    } else {
        (used_bytes as f64 / limit_bytes as f64) * 100.0
    };

    StorageUsage {
        used_bytes,
        limit_bytes,
        percentage,
        is_near_limit: used_bytes as f64 >= limit_bytes as f64 * NEAR_LIMIT_RATIO,
        is_exceeded: used_bytes >= limit_bytes,
    }
}

/// Bytes occupied by the database file and its WAL/SHM sidecars.
fn database_footprint(db_path: &Path) -> u64 {
    let base = db_path.as_os_str().to_string_lossy().into_owned();
    [base.clone(), format!("{base}-wal"), format!("{base}-shm")]
        .iter()
        .filter_map(|p| std::fs::metadata(p).ok())
        .map(|m| m.len())
        .sum()
}

/// What the disk holding `db_path` can accommodate in total: current usage
/// plus remaining free space. `None` when no mounted disk matches.
fn disk_quota(db_path: &Path, used_bytes: u64) -> Option<u64> {
    let disks = Disks::new_with_refreshed_list();
    let target = db_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // Longest mount point that prefixes the database directory wins.
    disks
        .list()
        .iter()
        .filter(|disk| target.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .map(|disk| used_bytes.saturating_add(disk.available_space()))
}
