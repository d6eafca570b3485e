// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the AgriSync offline core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Hard ceiling on local offline storage: 500 MB.
pub const DEFAULT_MAX_STORAGE_BYTES: u64 = 500 * 1024 * 1024;

/// Top-level AgriSync configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgrisyncConfig {
    /// Offline storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// At-rest payload encryption settings.
    #[serde(default)]
    pub crypto: CryptoConfig,

    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Offline storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// Hard ceiling on total persisted bytes. Writes are rejected, never
    /// silently dropped, once the effective limit is reached.
    #[serde(default = "default_max_storage_bytes")]
    pub max_storage_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            max_storage_bytes: default_max_storage_bytes(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("agrisync").join("agrisync.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("agrisync.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

fn default_max_storage_bytes() -> u64 {
    DEFAULT_MAX_STORAGE_BYTES
}

/// At-rest payload encryption configuration.
///
/// The secret feeds Argon2id key derivation in `agrisync-crypto`. When
/// absent, a compiled-in development secret is used; that posture is for
/// development only and is logged loudly.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CryptoConfig {
    /// Secret the payload key is derived from. `None` falls back to the
    /// development secret.
    #[serde(default)]
    pub secret: Option<String>,

    /// Argon2id memory cost in KiB.
    #[serde(default = "default_kdf_memory_cost")]
    pub kdf_memory_cost: u32,

    /// Argon2id iteration count.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Argon2id lane count.
    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            secret: None,
            kdf_memory_cost: default_kdf_memory_cost(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
        }
    }
}

fn default_kdf_memory_cost() -> u32 {
    19456
}

fn default_kdf_iterations() -> u32 {
    2
}

fn default_kdf_parallelism() -> u32 {
    1
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the backend API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path probed to decide whether the backend is reachable.
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            health_path: default_health_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_health_path() -> String {
    "/health".to_string()
}
