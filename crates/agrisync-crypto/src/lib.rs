// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The AgriSync crypto boundary.
//!
//! Every queued payload is encrypted with AES-256-GCM before it touches the
//! persistent store, using a key derived from the configured secret via
//! Argon2id. A SHA-256 content digest over the plaintext supports
//! duplicate/conflict detection.

pub mod cipher;
pub mod crypto;
pub mod digest;
pub mod kdf;

pub use cipher::PayloadCipher;
pub use digest::content_digest;
