// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the AgriSync offline core.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use agrisync_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Database: {}", config.storage.database_path);
//! ```

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AgrisyncConfig, ApiConfig, CryptoConfig, StorageConfig};
pub use validation::{validate_config, ConfigError};

/// Errors produced while loading and validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// TOML parsing or merging failed.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// One or more values deserialized but cannot work at runtime.
    #[error("invalid configuration: {}", format_errors(.0))]
    Invalid(Vec<ConfigError>),
}

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<AgrisyncConfig, LoadError> {
    let config = loader::load_config()?;
    validation::validate_config(&config).map_err(LoadError::Invalid)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<AgrisyncConfig, LoadError> {
    let config = loader::load_config_from_str(toml_content)?;
    validation::validate_config(&config).map_err(LoadError::Invalid)?;
    Ok(config)
}

fn format_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
