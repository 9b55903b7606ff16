/// In-memory document-store backend
///
/// Test implementation of [`DocumentStore`] that keeps each collection as a
/// vector of JSON documents behind an async `RwLock`. Insertion order is
/// preserved, which is what gives to-do listings their ordering guarantee in
/// tests.
///
/// Filter matching follows the MongoDB rules the production backend relies
/// on: a `field: value` pair matches when the stored field equals the value,
/// or when the stored field is an array containing the value.
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

/// In-memory document store for tests
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `document` satisfies every pair in `filter`
    ///
    /// An empty (or non-object) filter matches everything.
    fn matches(document: &Value, filter: &Value) -> bool {
        let Some(conditions) = filter.as_object() else {
            return true;
        };

        conditions.iter().all(|(field, expected)| {
            match document.get(field) {
                Some(actual) if actual == expected => true,
                // MongoDB array-membership: { members: "u1" } matches a
                // document whose members array contains "u1"
                Some(Value::Array(items)) => items.contains(expected),
                _ => false,
            }
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: &str, filter: Value) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        let found = collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| Self::matches(d, &filter)))
            .cloned();

        Ok(found)
    }

    async fn find_many(&self, collection: &str, filter: Value) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let found = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|d| Self::matches(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(found)
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(())
    }

    async fn update_fields(
        &self,
        collection: &str,
        filter: Value,
        fields: Value,
    ) -> Result<u64, StoreError> {
        let Some(new_fields) = fields.as_object().cloned() else {
            return Ok(0);
        };

        let mut collections = self.collections.write().await;
        let mut matched = 0;

        if let Some(documents) = collections.get_mut(collection) {
            for document in documents.iter_mut().filter(|d| Self::matches(d, &filter)) {
                if let Some(existing) = document.as_object_mut() {
                    for (field, value) in &new_fields {
                        existing.insert(field.clone(), value.clone());
                    }
                }
                matched += 1;
            }
        }

        Ok(matched)
    }

    async fn remove(&self, collection: &str, filter: Value) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let mut removed = 0;

        if let Some(documents) = collections.get_mut(collection) {
            let before = documents.len();
            documents.retain(|d| !Self::matches(d, &filter));
            removed = (before - documents.len()) as u64;
        }

        Ok(removed)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
