//! Flat-document collection storage.
//!
//! A collection is a named, ordered set of JSON documents persisted as a
//! unit. The store exposes whole-collection load and replace only: callers
//! read the full collection, compute a new full collection, and write the
//! full collection back. Partial-update semantics live in the repositories,
//! not here.
//!
//! All implementations must satisfy these invariants:
//! - `load` returns an empty sequence for a collection that has never been
//!   initialized, and recovers an unreadable persisted form as empty (the
//!   recovery is logged, never surfaced to the caller).
//! - `persist` replaces the whole collection atomically from a reader's
//!   perspective: a concurrent `load` observes either the prior or the new
//!   contents, never a half-written file.
//! - I/O failures other than corruption are propagated as [`StoreError`].

mod collection;
mod fs;
mod memory;

pub use collection::Collection;
pub use fs::FsStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a [`DocumentStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the persisted collection failed.
    #[error("I/O error for collection {collection}: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoding documents for persistence failed.
    #[error("failed to encode collection {collection}: {source}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-collection load/persist over named JSON document collections.
///
/// Implemented by [`FsStore`] for production and [`MemoryStore`] for tests.
/// Repositories access it through [`Collection`], which adds typed decode
/// and per-collection write locking.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load every document in a collection.
    ///
    /// Returns an empty vec if the collection has never been persisted.
    /// A persisted form that cannot be parsed is logged at WARN and
    /// recovered as empty.
    async fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Replace the entire collection with `documents`.
    async fn persist(&self, collection: &str, documents: &[Value]) -> Result<(), StoreError>;

    /// Whether the collection has ever been persisted.
    ///
    /// Used by the first-boot seed step to distinguish "never initialized"
    /// from "initialized but empty".
    async fn exists(&self, collection: &str) -> Result<bool, StoreError>;
}
