/// Document-store repository interface
///
/// Every persistence call in NitroCollab goes through the [`DocumentStore`]
/// trait: five operations keyed by collection name and a JSON filter. The
/// models build typed CRUD on top of it, and the access-control logic never
/// sees a driver type, so it can be tested against [`MemoryStore`] without a
/// live database.
///
/// # Implementations
///
/// - [`MongoStore`]: production backend over the MongoDB driver
/// - [`MemoryStore`]: in-process backend for tests, with MongoDB-compatible
///   filter semantics
///
/// # Filter semantics
///
/// A filter is a JSON object of `field: value` pairs. A document matches when
/// every pair matches; a pair matches when the stored field equals the value,
/// or when the stored field is an array containing the value (MongoDB's
/// array-membership rule, used for `members` lookups). An empty filter
/// matches every document.
///
/// # Example
///
/// ```no_run
/// use nitrocollab_shared::store::{DocumentStore, MemoryStore};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
///
/// store
///     .insert("users", json!({ "_id": "u1", "email": "a@example.com" }))
///     .await?;
///
/// let found = store
///     .find_one("users", json!({ "email": "a@example.com" }))
///     .await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Error type for document-store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database driver failed
    #[error("Database error: {0}")]
    Database(String),

    /// A document or filter could not be (de)serialized
    #[error("Document serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Shared handle to a document store
///
/// Cloned into application state and the GraphQL schema data.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Repository interface over a document database
///
/// Operations are keyed by collection name and a JSON filter (see the module
/// docs for the filter semantics). Individual document writes rely on the
/// backing store's own concurrency control; no operation spans more than one
/// document atomically.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the first document matching `filter`, or `None`
    async fn find_one(&self, collection: &str, filter: Value) -> Result<Option<Value>, StoreError>;

    /// Returns all documents matching `filter`, in insertion order
    async fn find_many(&self, collection: &str, filter: Value) -> Result<Vec<Value>, StoreError>;

    /// Appends a document to `collection`
    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError>;

    /// Overwrites the given fields on every document matching `filter`
    ///
    /// Returns the number of matched documents. Fields absent from `fields`
    /// are left untouched.
    async fn update_fields(
        &self,
        collection: &str,
        filter: Value,
        fields: Value,
    ) -> Result<u64, StoreError>;

    /// Deletes every document matching `filter`, returning the removed count
    async fn remove(&self, collection: &str, filter: Value) -> Result<u64, StoreError>;

    /// Verifies the store is reachable
    ///
    /// Used by the health endpoint; a failing ping marks the service
    /// degraded but is not fatal to the process.
    async fn ping(&self) -> Result<(), StoreError>;
}
