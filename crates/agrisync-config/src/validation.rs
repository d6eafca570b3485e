// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of configuration values.
//!
//! Figment plus `deny_unknown_fields` catches shape errors; this module
//! catches values that deserialize fine but cannot work at runtime.

use thiserror::Error;

use crate::model::AgrisyncConfig;

/// A configuration value that deserialized but cannot work at runtime.
#[derive(Debug, Error)]
#[error("invalid config value for `{key}`: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub reason: String,
}

impl ConfigError {
    fn new(key: &str, reason: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validate a loaded configuration, collecting every problem instead of
/// stopping at the first.
pub fn validate_config(config: &AgrisyncConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::new(
            "storage.database_path",
            "must not be empty",
        ));
    }
    if config.storage.max_storage_bytes == 0 {
        errors.push(ConfigError::new(
            "storage.max_storage_bytes",
            "must be greater than zero",
        ));
    }

    if config.crypto.kdf_memory_cost < 8 {
        errors.push(ConfigError::new(
            "crypto.kdf_memory_cost",
            "Argon2id requires at least 8 KiB of memory",
        ));
    }
    if config.crypto.kdf_iterations == 0 {
        errors.push(ConfigError::new(
            "crypto.kdf_iterations",
            "must be greater than zero",
        ));
    }
    if config.crypto.kdf_parallelism == 0 {
        errors.push(ConfigError::new(
            "crypto.kdf_parallelism",
            "must be greater than zero",
        ));
    }
    if let Some(secret) = &config.crypto.secret {
        if secret.len() < 8 {
            errors.push(ConfigError::new(
                "crypto.secret",
                "must be at least 8 characters",
            ));
        }
    }

    if !config.api.base_url.starts_with("http://") && !config.api.base_url.starts_with("https://")
    {
        errors.push(ConfigError::new(
            "api.base_url",
            "must start with http:// or https://",
        ));
    }
    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::new(
            "api.timeout_secs",
            "must be greater than zero",
        ));
    }
    if !config.api.health_path.starts_with('/') {
        errors.push(ConfigError::new(
            "api.health_path",
            "must start with a slash",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AgrisyncConfig;

    #[test]
    fn default_config_validates() {
        let config = AgrisyncConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_is_rejected() {
        let mut config = AgrisyncConfig::default();
        config.storage.database_path = "  ".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.key == "storage.database_path"));
    }

    #[test]
    fn zero_storage_ceiling_is_rejected() {
        let mut config = AgrisyncConfig::default();
        config.storage.max_storage_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.key == "storage.max_storage_bytes"));
    }

    #[test]
    fn short_secret_is_rejected() {
        let mut config = AgrisyncConfig::default();
        config.crypto.secret = Some("short".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.key == "crypto.secret"));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let mut config = AgrisyncConfig::default();
        config.api.base_url = "ftp://example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.key == "api.base_url"));
    }

    #[test]
    fn multiple_problems_are_all_reported() {
        let mut config = AgrisyncConfig::default();
        config.storage.max_storage_bytes = 0;
        config.crypto.kdf_iterations = 0;
        config.api.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
