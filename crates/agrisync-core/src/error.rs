// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the AgriSync offline core.

use thiserror::Error;

/// The primary error type used across all AgriSync adapter traits and core operations.
#[derive(Debug, Error)]
pub enum AgrisyncError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The local storage ceiling is reached; the write was rejected, not dropped.
    ///
    /// Callers must not retry the same write without freeing space first.
    #[error("offline storage full: {used_bytes} of {limit_bytes} bytes used")]
    StorageExceeded { used_bytes: u64, limit_bytes: u64 },

    /// Payload could not be serialized or sealed; nothing was persisted.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Stored envelope could not be opened (wrong key, corrupt ciphertext,
    /// malformed plaintext). The record stays queued for a later attempt.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Remote dispatch errors (transport failure, non-success response).
    #[error("dispatch error: {message}")]
    Dispatch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
