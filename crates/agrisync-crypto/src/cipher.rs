// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The payload cipher sealing every queued action before it touches disk.
//!
//! The encryption boundary exists to prevent casual inspection of locally
//! stored payloads on a shared device; transport security is the HTTP
//! layer's concern. One opaque base64 envelope carries the random nonce
//! followed by ciphertext and GCM tag.

use agrisync_config::CryptoConfig;
use agrisync_core::AgrisyncError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto;
use crate::kdf;

/// Compiled-in fallback secret used when no secret is configured.
///
/// Development-only posture: every install without a configured secret
/// shares this value, so payloads are only protected from casual reading.
const DEV_FALLBACK_SECRET: &str = "agrisync-offline-dev-secret-v1";

/// Fixed application salt for deriving the payload key from the static
/// configured secret. The secret is installation-wide, not per-user, so a
/// per-payload salt would add nothing here.
const KEY_DERIVATION_SALT: [u8; 16] = *b"agrisync/payload";

/// Symmetric cipher for payloads crossing the persistence boundary.
///
/// Debug output intentionally omits the key.
pub struct PayloadCipher {
    /// The derived payload key -- only in memory, never on disk.
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl PayloadCipher {
    /// Derive the payload key from the configured secret.
    ///
    /// A missing secret falls back to the compiled-in development secret
    /// and logs a warning.
    pub fn from_config(config: &CryptoConfig) -> Result<Self, AgrisyncError> {
        let secret = match &config.secret {
            Some(value) => SecretString::from(value.clone()),
            None => {
                warn!("no crypto secret configured; using the development fallback secret");
                SecretString::from(DEV_FALLBACK_SECRET.to_string())
            }
        };

        let key = kdf::derive_key(
            secret.expose_secret().as_bytes(),
            &KEY_DERIVATION_SALT,
            config.kdf_memory_cost,
            config.kdf_iterations,
            config.kdf_parallelism,
        )?;

        debug!("payload cipher initialized");
        Ok(Self { key })
    }

    /// Serialize and encrypt a structured value into an opaque envelope.
    ///
    /// A serialization or seal failure aborts the whole operation; the
    /// caller must not persist anything for this action.
    pub fn seal_value(&self, value: &serde_json::Value) -> Result<String, AgrisyncError> {
        let plaintext = serde_json::to_vec(value)
            .map_err(|e| AgrisyncError::Encryption(format!("payload serialization failed: {e}")))?;

        let (ciphertext, nonce) = crypto::seal(&self.key, &plaintext)?;

        let mut envelope = Vec::with_capacity(nonce.len() + ciphertext.len());
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(envelope))
    }

    /// Decrypt an envelope back into its structured value.
    ///
    /// Every failure mode (bad base64, wrong key, corrupted ciphertext,
    /// malformed plaintext) maps to [`AgrisyncError::Decryption`] so the
    /// queue manager can treat the record uniformly as "cannot currently
    /// be processed".
    pub fn open_value(&self, envelope: &str) -> Result<serde_json::Value, AgrisyncError> {
        let raw = STANDARD
            .decode(envelope.as_bytes())
            .map_err(|e| AgrisyncError::Decryption(format!("invalid envelope encoding: {e}")))?;

        if raw.len() < 12 {
            return Err(AgrisyncError::Decryption(
                "envelope too short to contain a nonce".to_string(),
            ));
        }
        let (nonce_bytes, ciphertext) = raw.split_at(12);
        let nonce: [u8; 12] = nonce_bytes
            .try_into()
            .map_err(|_| AgrisyncError::Decryption("corrupted envelope nonce".to_string()))?;

        let plaintext = crypto::open(&self.key, &nonce, ciphertext)?;

        serde_json::from_slice(&plaintext)
            .map_err(|e| AgrisyncError::Decryption(format!("decrypted payload is not valid JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test-specific CryptoConfig with low KDF cost for fast tests.
    fn test_config(secret: Option<&str>) -> CryptoConfig {
        CryptoConfig {
            secret: secret.map(str::to_string),
            kdf_memory_cost: 8,
            kdf_iterations: 1,
            kdf_parallelism: 1,
        }
    }

    #[test]
    fn seal_open_roundtrips_structured_values() {
        let cipher = PayloadCipher::from_config(&test_config(Some("roundtrip-secret"))).unwrap();
        let value = serde_json::json!({
            "mission_id": "m-7",
            "notes": "irrigation filters cleaned",
            "image": null,
        });

        let envelope = cipher.seal_value(&value).unwrap();
        assert_ne!(envelope, value.to_string());

        let opened = cipher.open_value(&envelope).unwrap();
        assert_eq!(opened, value);
    }

    #[test]
    fn envelope_is_opaque_base64() {
        let cipher = PayloadCipher::from_config(&test_config(Some("opaque-secret"))).unwrap();
        let envelope = cipher
            .seal_value(&serde_json::json!({"details": "flood in north field"}))
            .unwrap();

        // Decodes as base64 and carries no plaintext fragments.
        let raw = STANDARD.decode(envelope.as_bytes()).unwrap();
        assert!(raw.len() > 12 + 16);
        assert!(!envelope.contains("flood"));
    }

    #[test]
    fn open_with_different_secret_fails() {
        let sealer = PayloadCipher::from_config(&test_config(Some("secret-aaaa"))).unwrap();
        let opener = PayloadCipher::from_config(&test_config(Some("secret-bbbb"))).unwrap();

        let envelope = sealer.seal_value(&serde_json::json!({"x": 1})).unwrap();
        let result = opener.open_value(&envelope);

        assert!(matches!(result, Err(AgrisyncError::Decryption(_))));
    }

    #[test]
    fn tampered_envelope_fails_to_open() {
        let cipher = PayloadCipher::from_config(&test_config(Some("tamper-secret"))).unwrap();
        let envelope = cipher.seal_value(&serde_json::json!({"x": 1})).unwrap();

        let mut raw = STANDARD.decode(envelope.as_bytes()).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = STANDARD.encode(raw);

        assert!(cipher.open_value(&tampered).is_err());
    }

    #[test]
    fn garbage_envelope_fails_to_open() {
        let cipher = PayloadCipher::from_config(&test_config(Some("garbage-secret"))).unwrap();
        assert!(cipher.open_value("not base64 at all!!!").is_err());
        assert!(cipher.open_value("AAAA").is_err());
    }

    #[test]
    fn missing_secret_falls_back_to_dev_secret() {
        let cipher_a = PayloadCipher::from_config(&test_config(None)).unwrap();
        let cipher_b = PayloadCipher::from_config(&test_config(None)).unwrap();

        // Two instances without a configured secret derive the same key.
        let envelope = cipher_a.seal_value(&serde_json::json!({"x": 1})).unwrap();
        assert!(cipher_b.open_value(&envelope).is_ok());
    }
}
