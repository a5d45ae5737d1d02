//! In-memory blob store for tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::BlobStore;
use crate::error::{EnvputError, EnvputResult};

#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    failing: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation on `key` fail with a transfer error
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn insert(&self, key: &str, data: Vec<u8>) {
        self.blobs.lock().unwrap().insert(key.to_string(), data);
    }

    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    fn check(&self, key: &str) -> EnvputResult<()> {
        if self.failing.contains(key) {
            Err(EnvputError::StorageTransfer(format!(
                "simulated failure for {}",
                key
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put(&self, key: &str, data: Vec<u8>) -> EnvputResult<()> {
        self.check(key)?;
        self.insert(key, data);
        Ok(())
    }

    async fn get(&self, key: &str) -> EnvputResult<Vec<u8>> {
        self.check(key)?;
        self.blob(key)
            .ok_or_else(|| EnvputError::StorageNotFound(self.location(key)))
    }

    async fn exists(&self, key: &str) -> EnvputResult<bool> {
        self.check(key)?;
        Ok(self.blob(key).is_some())
    }

    fn location(&self, key: &str) -> String {
        format!("mem://{}", key)
    }
}
