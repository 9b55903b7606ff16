/// User model and document operations
///
/// Users are created by sign-up, read by sign-in and identity resolution, and
/// never deleted through the API. Emails are unique across the collection;
/// the uniqueness check lives in the sign-up path, since the document store
/// exposes no constraint mechanism.
///
/// # Document shape
///
/// ```json
/// {
///   "_id": "uuid",
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "password_hash": "$argon2id$...",
///   "avatar": null,
///   "created_at": "2026-01-01T00:00:00Z"
/// }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::store::{DocumentStore, StoreError};

/// Collection holding user documents
pub const COLLECTION: &str = "users";

/// A user account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID v4)
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across the store
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Optional avatar image reference
    pub avatar: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,

    /// Optional avatar image reference
    pub avatar: Option<String>,
}

impl User {
    /// Creates a new user document
    ///
    /// The id is a freshly generated UUID v4 and `created_at` is the current
    /// time. Callers are responsible for checking email uniqueness first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub async fn create(store: &dyn DocumentStore, data: CreateUser) -> Result<Self, StoreError> {
        let user = Self {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            avatar: data.avatar,
            created_at: Utc::now(),
        };

        store.insert(COLLECTION, serde_json::to_value(&user)?).await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns `None` if no such user exists.
    pub async fn find_by_id(store: &dyn DocumentStore, id: Uuid) -> Result<Option<Self>, StoreError> {
        let found = store.find_one(COLLECTION, json!({ "_id": id })).await?;

        found.map(|doc| serde_json::from_value(doc).map_err(Into::into)).transpose()
    }

    /// Finds a user by email address
    ///
    /// Used by sign-in and by the sign-up duplicate check.
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<Self>, StoreError> {
        let found = store.find_one(COLLECTION, json!({ "email": email })).await?;

        found.map(|doc| serde_json::from_value(doc).map_err(Into::into)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sample() -> CreateUser {
        CreateUser {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let store = MemoryStore::new();

        let user = User::create(&store, sample()).await.unwrap();
        let found = User::find_by_id(&store, user.id).await.unwrap().unwrap();

        assert_eq!(found.id, user.id);
        assert_eq!(found.email, "test@example.com");
        assert_eq!(found.password_hash, "$argon2id$test");
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let store = MemoryStore::new();
        let user = User::create(&store, sample()).await.unwrap();

        let found = User::find_by_email(&store, "test@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        let missing = User::find_by_email(&store, "other@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_unique_per_create() {
        let store = MemoryStore::new();

        let a = User::create(&store, sample()).await.unwrap();
        let b = User::create(&store, sample()).await.unwrap();

        assert_ne!(a.id, b.id);
    }
}
