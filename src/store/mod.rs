//! Document store capability.
//!
//! The handler set talks to persistence exclusively through the
//! [`DocumentStore`] trait: filtered finds, id-addressed single-record
//! reads, and id-addressed mutations. The store owns all persisted state;
//! handlers keep no state across requests beyond the shared handle.

pub mod document;
pub mod filter;
pub mod json_store;

use serde_json::Value;
use thiserror::Error;

pub use document::{new_document_id, parse_document_id, stamp_created_at};
pub use filter::{Clause, ClauseOp, Filter, Projection, SortOrder};
pub use json_store::JsonStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Data directory missing, uncreatable, or unreadable
    #[error("cannot open store at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Collection file could not be read or written
    #[error("I/O failure on collection {collection}: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// Collection file held something other than an array of objects
    #[error("collection {0} is corrupt")]
    Corrupt(String),

    /// Internal lock poisoned by a panicking writer
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Generic CRUD capability over named collections of JSON documents.
///
/// Single-record operations address documents by their `id` field; the
/// store generates ids on insert. Implementations must be safe to share
/// across concurrent requests behind one handle.
pub trait DocumentStore: Send + Sync {
    /// Find all documents matching `filter`, ordered by `sort` when given,
    /// each reduced to `projection` when given.
    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<&SortOrder>,
        projection: Option<&Projection>,
    ) -> StoreResult<Vec<Value>>;

    /// Find one document by id. `Ok(None)` means no match.
    fn find_one(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Insert a document, generating and returning its id.
    fn insert_one(&self, collection: &str, doc: Value) -> StoreResult<String>;

    /// Set `fields_to_set` on the document with the given id.
    /// Returns the matched count (0 or 1).
    fn update_one(&self, collection: &str, id: &str, fields_to_set: Value) -> StoreResult<u64>;

    /// Delete the document with the given id. Returns the deleted count
    /// (0 or 1).
    fn delete_one(&self, collection: &str, id: &str) -> StoreResult<u64>;
}
