// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./agrisync.toml` > `~/.config/agrisync/agrisync.toml`
//! > `/etc/agrisync/agrisync.toml` with environment variable overrides via the
//! `AGRISYNC_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AgrisyncConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/agrisync/agrisync.toml` (system-wide)
/// 3. `~/.config/agrisync/agrisync.toml` (user XDG config)
/// 4. `./agrisync.toml` (local directory)
/// 5. `AGRISYNC_*` environment variables
pub fn load_config() -> Result<AgrisyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AgrisyncConfig::default()))
        .merge(Toml::file("/etc/agrisync/agrisync.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("agrisync/agrisync.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("agrisync.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AgrisyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AgrisyncConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AgrisyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AgrisyncConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. `AGRISYNC_STORAGE_MAX_STORAGE_BYTES`
/// must map to `storage.max_storage_bytes`, not `storage.max.storage.bytes`.
fn env_provider() -> Env {
    Env::prefixed("AGRISYNC_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("storage_", "storage.", 1)
            .replacen("crypto_", "crypto.", 1)
            .replacen("api_", "api.", 1);
        mapped.into()
    })
}
