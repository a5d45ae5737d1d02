//! envput - encrypted environment files in S3
//!
//! This library encrypts local environment files under a shared project
//! passphrase and stores the resulting blobs in an S3 bucket, so a team can
//! sync secrets without ever uploading plaintext.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: PBKDF2 key derivation and AES-256-CBC encryption
//! - `envelope`: Self-describing byte layout for salt, IV and ciphertext
//! - `config`: `.envputrc` location, model and storage key derivation
//! - `storage`: Blob store abstraction, S3 implementation, atomic local writes
//! - `setup`: Interactive wizard behind `envput init`
//! - `cli`: Command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use envput::envelope::Envelope;
//!
//! let blob = Envelope::seal(b"API_KEY=abc", b"passphrase").to_bytes()?;
//! let plaintext = Envelope::from_bytes(&blob)?.open(b"passphrase")?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod setup;
pub mod storage;

pub use error::{EnvputError, EnvputResult};
