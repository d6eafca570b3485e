// SPDX-FileCopyrightText: 2026 AgriSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id key derivation from the configured secret.
//!
//! Derives a 32-byte key using Argon2id (Algorithm::Argon2id, Version::V0x13)
//! with parameters from CryptoConfig (OWASP-recommended defaults).

use agrisync_core::AgrisyncError;
use zeroize::Zeroizing;

/// Derive a 32-byte key from a secret using Argon2id.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory zeroing
/// on drop.
pub fn derive_key(
    secret: &[u8],
    salt: &[u8; 16],
    memory_cost: u32,
    iterations: u32,
    parallelism: u32,
) -> Result<Zeroizing<[u8; 32]>, AgrisyncError> {
    let params = argon2::Params::new(memory_cost, iterations, parallelism, Some(32))
        .map_err(|e| AgrisyncError::Encryption(format!("invalid Argon2id parameters: {e}")))?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(secret, salt, output.as_mut())
        .map_err(|e| AgrisyncError::Encryption(format!("Argon2id key derivation failed: {e}")))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_produces_consistent_output() {
        let salt = [1u8; 16];
        let secret = b"test secret";

        // Use low cost for fast tests.
        let key1 = derive_key(secret, &salt, 32768, 2, 1).unwrap();
        let key2 = derive_key(secret, &salt, 32768, 2, 1).unwrap();

        assert_eq!(*key1, *key2);
    }

    #[test]
    fn derive_key_different_secret_produces_different_output() {
        let salt = [2u8; 16];

        let key1 = derive_key(b"secret one", &salt, 32768, 2, 1).unwrap();
        let key2 = derive_key(b"secret two", &salt, 32768, 2, 1).unwrap();

        assert_ne!(*key1, *key2);
    }

    #[test]
    fn derive_key_different_salt_produces_different_output() {
        let secret = b"same secret";

        let key1 = derive_key(secret, &[1u8; 16], 32768, 2, 1).unwrap();
        let key2 = derive_key(secret, &[2u8; 16], 32768, 2, 1).unwrap();

        assert_ne!(*key1, *key2);
    }

    #[test]
    fn derive_key_output_is_32_bytes() {
        let key = derive_key(b"test", &[0u8; 16], 32768, 2, 1).unwrap();
        assert_eq!(key.len(), 32);
    }
}
