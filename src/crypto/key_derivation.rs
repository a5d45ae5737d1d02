//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Stretches the project passphrase with a per-encryption salt into the
//! 32-byte AES-256 key. Parameters are fixed so that every blob ever written
//! can be decrypted from the passphrase and its embedded salt alone.

use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use super::{KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};

/// A derived encryption key, zeroed when dropped
pub struct DerivedKey {
    key: Zeroizing<[u8; KEY_SIZE]>,
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

/// Derive an encryption key from a passphrase and salt
///
/// Deterministic: the same `(passphrase, salt)` always yields the same key.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> DerivedKey {
    debug!(
        salt_len = salt.len(),
        iterations = PBKDF2_ITERATIONS,
        "deriving key"
    );

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2_hmac::<Sha256>(passphrase, salt, PBKDF2_ITERATIONS, key.as_mut());

    DerivedKey { key }
}

/// Generate a fresh random salt from the OS CSPRNG
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_length() {
        let key = derive_key(b"test_passphrase", &[7u8; SALT_SIZE]);
        assert_eq!(key.as_bytes().len(), KEY_SIZE);
    }

    #[test]
    fn test_same_inputs_same_key() {
        let salt = [1u8; SALT_SIZE];
        let key1 = derive_key(b"test_passphrase", &salt);
        let key2 = derive_key(b"test_passphrase", &salt);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = [1u8; SALT_SIZE];
        let key1 = derive_key(b"passphrase1", &salt);
        let key2 = derive_key(b"passphrase2", &salt);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key(b"same_passphrase", &[1u8; SALT_SIZE]);
        let key2 = derive_key(b"same_passphrase", &[2u8; SALT_SIZE]);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_matches_known_vector() {
        // PBKDF2-HMAC-SHA256("password", "salt", 100000, 32)
        let key = derive_key(b"password", b"salt");
        assert_eq!(
            hex::encode(key.as_bytes()),
            "0394a2ede332c9a13eb82e9b24631604c31df978b4e2f0fbd2c549944f9d79a5"
        );
    }

    #[test]
    fn test_generate_salt_unique() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
