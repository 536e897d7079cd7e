//! In-memory document store for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, StoreError};

/// Test double for [`FsStore`]: collections live in a map, nothing touches
/// disk. Distinguishes "never persisted" from "persisted but empty" the same
/// way the filesystem store does.
///
/// [`FsStore`]: super::FsStore
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn persist(&self, collection: &str, documents: &[Value]) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections.insert(collection.to_owned(), documents.to_vec());
        Ok(())
    }

    async fn exists(&self, collection: &str) -> Result<bool, StoreError> {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        Ok(collections.contains_key(collection))
    }
}
