//! Typed handle over one named collection.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{DocumentStore, StoreError};

/// A typed view of one named collection, adding decode/encode and mutation
/// locking on top of the raw [`DocumentStore`].
///
/// Every mutation is a full read-modify-write: load the collection, apply
/// the closure, persist the result. Two such sequences interleaving would
/// silently drop the first writer's result, so the collection owns a write
/// lock held across the entire span. Reads take a snapshot without the
/// lock; the store's rename-based persistence keeps snapshots consistent.
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    write_lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            name: self.name,
            write_lock: Arc::clone(&self.write_lock),
            _marker: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a handle for the collection `name`.
    ///
    /// Handles cloned from this one share its write lock; creating two
    /// independent handles for the same name defeats mutation locking, so
    /// each repository creates its collection exactly once.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self {
            store,
            name,
            write_lock: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        }
    }

    /// The collection name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Load a consistent snapshot of every document.
    pub async fn all(&self) -> Result<Vec<T>, StoreError> {
        let documents = self.store.load(self.name).await?;
        Ok(self.decode(documents))
    }

    /// Apply one logical mutation to the collection.
    ///
    /// Holds the collection's write lock across load, `f`, and persist.
    /// When `f` returns an error the collection is left unchanged and the
    /// error is passed through; the lock is released on every exit path.
    pub async fn mutate<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut documents = self.decode(self.store.load(self.name).await?);
        let result = f(&mut documents)?;

        let encoded = self.encode(&documents)?;
        self.store.persist(self.name, &encoded).await?;

        Ok(result)
    }

    /// Decode raw documents, recovering undecodable contents as an empty
    /// collection (logged, same availability choice as unreadable files).
    fn decode(&self, documents: Vec<Value>) -> Vec<T> {
        let count = documents.len();
        let mut decoded = Vec::with_capacity(count);
        for document in documents {
            match serde_json::from_value(document) {
                Ok(value) => decoded.push(value),
                Err(err) => {
                    tracing::warn!(
                        collection = self.name,
                        error = %err,
                        "collection contains an undecodable document, recovering as empty"
                    );
                    return Vec::new();
                }
            }
        }
        decoded
    }

    fn encode(&self, documents: &[T]) -> Result<Vec<Value>, StoreError> {
        documents
            .iter()
            .map(|document| {
                serde_json::to_value(document).map_err(|err| StoreError::Encode {
                    collection: self.name.to_owned(),
                    source: err,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Doc {
        id: i64,
    }

    fn collection() -> Collection<Doc> {
        Collection::new(Arc::new(MemoryStore::new()), "docs")
    }

    #[tokio::test]
    async fn test_mutate_persists_result() {
        let docs = collection();
        docs.mutate::<_, StoreError, _>(|all| {
            all.push(Doc { id: 1 });
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(docs.all().await.unwrap(), vec![Doc { id: 1 }]);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_collection_unchanged() {
        let docs = collection();
        docs.mutate::<_, StoreError, _>(|all| {
            all.push(Doc { id: 1 });
            Ok(())
        })
        .await
        .unwrap();

        let result: Result<(), StoreError> = docs
            .mutate(|all| {
                all.clear();
                Err(StoreError::Encode {
                    collection: "docs".to_owned(),
                    source: serde::de::Error::custom("rejected"),
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(docs.all().await.unwrap(), vec![Doc { id: 1 }]);
    }

    #[tokio::test]
    async fn test_concurrent_mutations_are_not_lost() {
        let docs = collection();

        let tasks: Vec<_> = (0..20)
            .map(|id| {
                let docs = docs.clone();
                tokio::spawn(async move {
                    docs.mutate::<_, StoreError, _>(move |all| {
                        all.push(Doc { id });
                        Ok(())
                    })
                    .await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(docs.all().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_undecodable_document_recovers_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store
            .persist("docs", &[json!({"id": 1}), json!({"id": "not-a-number"})])
            .await
            .unwrap();

        let docs: Collection<Doc> = Collection::new(store, "docs");
        assert!(docs.all().await.unwrap().is_empty());
    }
}
