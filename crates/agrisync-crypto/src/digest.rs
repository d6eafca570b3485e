// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content hashing for duplicate/conflict detection.
//!
//! The digest covers the plaintext payload before encryption. It signals
//! "same content" at SHA-256 collision odds; it is not an integrity check
//! on the ciphertext (GCM's tag already covers that).

use ring::digest::{digest, SHA256};

/// SHA-256 hex digest over the canonical JSON form of a payload.
///
/// `serde_json::Value` maps keep their keys sorted, so serializing the same
/// logical content always produces the same digest.
pub fn content_digest(value: &serde_json::Value) -> String {
    let canonical = value.to_string();
    hex::encode(digest(&SHA256, canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_64_hex_chars() {
        let d = content_digest(&serde_json::json!({"a": 1}));
        assert_eq!(d.len(), 64);
        assert!(d.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn same_content_same_digest_across_instances() {
        let a = serde_json::json!({"category": "flood", "details": "x"});
        let b = serde_json::json!({"category": "flood", "details": "x"});
        assert_eq!(content_digest(&a), content_digest(&b));
    }

    #[test]
    fn different_content_different_digest() {
        let a = serde_json::json!({"details": "north field"});
        let b = serde_json::json!({"details": "south field"});
        assert_ne!(content_digest(&a), content_digest(&b));
    }
}
