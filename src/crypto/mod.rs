//! Cryptographic functions for envput
//!
//! Provides AES-256-CBC encryption with PBKDF2-HMAC-SHA256 key derivation.
//! Parameters are part of the stored blob format and must not change.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{decrypt, encrypt, EncryptedData};
pub use key_derivation::{derive_key, generate_salt, DerivedKey};
pub use secure_memory::SecureString;

/// Size of the AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;

/// Size of the key derivation salt in bytes
pub const SALT_SIZE: usize = 16;

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// PBKDF2 rounds. Lowering this weakens every stored secret.
pub const PBKDF2_ITERATIONS: u32 = 100_000;
