//! Filesystem-backed document store.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, StoreError};

/// Stores each collection as `<root>/<collection>.json`, a pretty-printed
/// JSON array of documents.
///
/// Persistence is replace-on-write: the new contents are written to a
/// temporary file in the same directory and renamed over the old file, so a
/// reader never observes a partially written collection and a failed write
/// leaves the prior state intact.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// persist, not here.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    fn io_error(collection: &str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            collection: collection.to_owned(),
            source,
        }
    }
}

#[async_trait]
impl DocumentStore for FsStore {
    async fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let path = self.collection_path(collection);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Self::io_error(collection, err)),
        };

        // Corruption is recovered as an empty collection. The next persist
        // will overwrite the unreadable file.
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(documents)) => Ok(documents),
            Ok(other) => {
                tracing::warn!(
                    collection,
                    found = %json_type_name(&other),
                    "persisted collection is not an array, recovering as empty"
                );
                Ok(Vec::new())
            }
            Err(err) => {
                tracing::warn!(
                    collection,
                    error = %err,
                    "persisted collection is unreadable, recovering as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, collection: &str, documents: &[Value]) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| Self::io_error(collection, err))?;

        let bytes = serde_json::to_vec_pretty(documents).map_err(|err| StoreError::Encode {
            collection: collection.to_owned(),
            source: err,
        })?;

        // Write-to-temp-then-rename keeps the swap atomic for readers.
        let path = self.collection_path(collection);
        let tmp_path = self.root.join(format!(".{collection}.json.tmp"));

        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|err| Self::io_error(collection, err))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|err| Self::io_error(collection, err))?;

        Ok(())
    }

    async fn exists(&self, collection: &str) -> Result<bool, StoreError> {
        tokio::fs::try_exists(self.collection_path(collection))
            .await
            .map_err(|err| Self::io_error(collection, err))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl std::fmt::Debug for FsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsStore").field("root", &self.root).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn temp_store() -> (tempfile::TempDir, FsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_load_uninitialized_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load("users").await.unwrap().is_empty());
        assert!(!store.exists("users").await.unwrap());
    }

    #[tokio::test]
    async fn test_persist_then_load_roundtrip() {
        let (_dir, store) = temp_store();
        let documents = vec![json!({"id": 1, "name": "Cap"}), json!({"id": 2})];

        store.persist("products", &documents).await.unwrap();

        assert!(store.exists("products").await.unwrap());
        assert_eq!(store.load("products").await.unwrap(), documents);
    }

    #[tokio::test]
    async fn test_persist_replaces_whole_collection() {
        let (_dir, store) = temp_store();
        store
            .persist("orders", &[json!({"id": 1}), json!({"id": 2})])
            .await
            .unwrap();
        store.persist("orders", &[json!({"id": 2})]).await.unwrap();

        assert_eq!(store.load("orders").await.unwrap(), vec![json!({"id": 2})]);
    }

    #[tokio::test]
    async fn test_corrupt_file_recovers_as_empty() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("users.json"), b"{not json").unwrap();

        assert!(store.load("users").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_array_file_recovers_as_empty() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("users.json"), b"{\"id\": 1}").unwrap();

        assert!(store.load("users").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persist_leaves_no_temp_file() {
        let (dir, store) = temp_store();
        store.persist("users", &[json!({"id": 1})]).await.unwrap();

        assert!(!dir.path().join(".users.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_persisted_file_is_valid_json() {
        let (dir, store) = temp_store();
        store
            .persist("products", &[json!({"id": 1, "price": 20.0})])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("products.json")).unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed.is_array());
    }
}
