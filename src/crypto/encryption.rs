//! AES-256-CBC encryption/decryption
//!
//! Every call draws a fresh salt and IV, derives its own key and drops it when
//! done. There is no authentication tag: a tampered ciphertext that still
//! unpads cleanly decrypts to garbage instead of failing.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;

use crate::error::{EnvputError, EnvputResult};

use super::key_derivation::{derive_key, generate_salt};
use super::{BLOCK_SIZE, IV_SIZE, SALT_SIZE};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Output of a single encryption: the ciphertext plus everything besides the
/// passphrase needed to reverse it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    /// PKCS#7-padded AES-256-CBC ciphertext
    pub ciphertext: Vec<u8>,
    /// Initialization vector, unique per call
    pub iv: [u8; IV_SIZE],
    /// Key derivation salt, unique per call
    pub salt: [u8; SALT_SIZE],
}

/// Encrypt plaintext under a passphrase
///
/// Generates a random salt and IV for each encryption operation.
pub fn encrypt(plaintext: &[u8], passphrase: &[u8]) -> EncryptedData {
    let salt = generate_salt();
    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);

    let key = derive_key(passphrase, &salt);
    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), (&iv).into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "encrypted payload"
    );

    EncryptedData {
        ciphertext,
        iv,
        salt,
    }
}

/// Decrypt ciphertext with the passphrase, IV and salt used to produce it
///
/// A wrong passphrase, salt or IV cannot be told apart from corrupted data;
/// both surface as [`EnvputError::Decryption`].
pub fn decrypt(
    ciphertext: &[u8],
    iv: &[u8],
    salt: &[u8],
    passphrase: &[u8],
) -> EnvputResult<Vec<u8>> {
    if iv.len() != IV_SIZE {
        return Err(EnvputError::Decryption(format!(
            "Invalid IV size: expected {}, got {}",
            IV_SIZE,
            iv.len()
        )));
    }

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(EnvputError::Decryption(format!(
            "Ciphertext length {} is not a positive multiple of the {}-byte block size",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let key = derive_key(passphrase, salt);
    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| EnvputError::Decryption(format!("Failed to create cipher: {}", e)))?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| EnvputError::Decryption("Invalid padding: wrong key or corrupted data".into()))
}
