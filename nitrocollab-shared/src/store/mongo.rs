/// MongoDB document-store backend
///
/// Production implementation of [`DocumentStore`] over the official MongoDB
/// driver. Documents and filters cross the trait boundary as `serde_json`
/// values and are converted to BSON at this layer, so nothing above it
/// depends on driver types.
///
/// # Example
///
/// ```no_run
/// use nitrocollab_shared::store::MongoStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MongoStore::connect("mongodb://localhost:27017", "nitrocollab").await?;
/// store.ping().await?;
/// # Ok(())
/// # }
/// ```
use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Client, Database};
use serde_json::Value;
use tracing::{debug, info};

use super::{DocumentStore, StoreError};

/// MongoDB-backed document store
///
/// Holds a database handle; the driver manages its own connection pool, so
/// this struct is cheap to clone and share.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connects to MongoDB and verifies the database is reachable
    ///
    /// # Arguments
    ///
    /// * `uri` - MongoDB connection string (e.g., `mongodb://localhost:27017`)
    /// * `db_name` - Name of the database holding the collections
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the URI is invalid or the initial
    /// ping fails.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        debug!("Connecting to MongoDB...");

        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);

        // Fail fast on an unreachable server instead of at the first query
        db.run_command(doc! { "ping": 1 }).await?;

        info!(database = %db_name, "MongoDB connection established");

        Ok(Self { db })
    }

    fn to_document(value: &Value) -> Result<Document, StoreError> {
        Ok(bson::to_document(value)?)
    }

    fn to_value(document: Document) -> Result<Value, StoreError> {
        Ok(serde_json::to_value(document)?)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one(&self, collection: &str, filter: Value) -> Result<Option<Value>, StoreError> {
        let filter = Self::to_document(&filter)?;
        let found = self
            .db
            .collection::<Document>(collection)
            .find_one(filter)
            .await?;

        found.map(Self::to_value).transpose()
    }

    async fn find_many(&self, collection: &str, filter: Value) -> Result<Vec<Value>, StoreError> {
        let filter = Self::to_document(&filter)?;
        let documents: Vec<Document> = self
            .db
            .collection::<Document>(collection)
            .find(filter)
            .await?
            .try_collect()
            .await?;

        documents.into_iter().map(Self::to_value).collect()
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        let document = Self::to_document(&document)?;
        self.db
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        Ok(())
    }

    async fn update_fields(
        &self,
        collection: &str,
        filter: Value,
        fields: Value,
    ) -> Result<u64, StoreError> {
        let filter = Self::to_document(&filter)?;
        let fields = Self::to_document(&fields)?;
        let result = self
            .db
            .collection::<Document>(collection)
            .update_many(filter, doc! { "$set": fields })
            .await?;

        Ok(result.matched_count)
    }

    async fn remove(&self, collection: &str, filter: Value) -> Result<u64, StoreError> {
        let filter = Self::to_document(&filter)?;
        let result = self
            .db
            .collection::<Document>(collection)
            .delete_many(filter)
            .await?;

        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
