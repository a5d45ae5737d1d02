//! Storage layer for envput
//!
//! Remote blobs go through the [`BlobStore`] trait; the only production
//! implementation is [`S3Store`]. Local environment files are written with
//! the atomic helpers in [`file_io`].

pub mod file_io;
#[cfg(test)]
pub mod memory;
pub mod s3;

use async_trait::async_trait;

use crate::error::EnvputResult;

pub use s3::S3Store;

/// A key/value store for opaque envelope blobs
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob, replacing any existing one under the same key
    async fn put(&self, key: &str, data: Vec<u8>) -> EnvputResult<()>;

    /// Fetch a blob; fails with `StorageNotFound` if absent
    async fn get(&self, key: &str) -> EnvputResult<Vec<u8>>;

    /// Check whether a blob exists
    async fn exists(&self, key: &str) -> EnvputResult<bool>;

    /// Human-readable location of a key, for messages
    fn location(&self, key: &str) -> String;
}
