/// Task list model and document operations
///
/// A task list is owned collectively by its members. The creator is added as
/// the sole initial member at insert time, so the member set is never empty
/// for a stored list. Membership changes are read-modify-write over the
/// whole `members` array; there is no cross-document transaction, so
/// concurrent member additions are best-effort (last write wins).
///
/// # Document shape
///
/// ```json
/// {
///   "_id": "uuid",
///   "title": "Groceries",
///   "created_at": "2026-01-01T00:00:00Z",
///   "members": ["uuid", "uuid"]
/// }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::store::{DocumentStore, StoreError};

/// Collection holding task list documents
pub const COLLECTION: &str = "task_lists";

/// A shared task list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    /// Unique task list ID (UUID v4)
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// List title
    pub title: String,

    /// When the list was created
    pub created_at: DateTime<Utc>,

    /// Ordered member set; the creator is always first
    pub members: Vec<Uuid>,
}

/// Input for creating a new task list
#[derive(Debug, Clone)]
pub struct CreateTaskList {
    /// List title
    pub title: String,

    /// The acting user, added as the sole initial member
    pub creator: Uuid,
}

impl TaskList {
    /// Creates a new task list with the creator as its only member
    pub async fn create(
        store: &dyn DocumentStore,
        data: CreateTaskList,
    ) -> Result<Self, StoreError> {
        let task_list = Self {
            id: Uuid::new_v4(),
            title: data.title,
            created_at: Utc::now(),
            members: vec![data.creator],
        };

        store
            .insert(COLLECTION, serde_json::to_value(&task_list)?)
            .await?;

        Ok(task_list)
    }

    /// Finds a task list by ID
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: Uuid,
    ) -> Result<Option<Self>, StoreError> {
        let found = store.find_one(COLLECTION, json!({ "_id": id })).await?;

        found.map(|doc| serde_json::from_value(doc).map_err(Into::into)).transpose()
    }

    /// Lists every task list whose member set contains `user_id`
    ///
    /// Relies on the store's array-membership filter semantics.
    pub async fn list_by_member(
        store: &dyn DocumentStore,
        user_id: Uuid,
    ) -> Result<Vec<Self>, StoreError> {
        let found = store
            .find_many(COLLECTION, json!({ "members": user_id }))
            .await?;

        found
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .collect()
    }

    /// Overwrites the title of a task list
    ///
    /// Returns the post-update record re-read from the store, or `None` if
    /// the list does not exist. The write and the re-read are two separate
    /// operations with no atomicity guarantee against concurrent writers.
    pub async fn set_title(
        store: &dyn DocumentStore,
        id: Uuid,
        title: &str,
    ) -> Result<Option<Self>, StoreError> {
        let matched = store
            .update_fields(COLLECTION, json!({ "_id": id }), json!({ "title": title }))
            .await?;

        if matched == 0 {
            return Ok(None);
        }

        Self::find_by_id(store, id).await
    }

    /// Appends a user to the member set
    ///
    /// Idempotent: adding an existing member returns the current state
    /// unchanged. Returns `None` if the task list does not exist.
    pub async fn add_member(
        store: &dyn DocumentStore,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, StoreError> {
        let Some(mut task_list) = Self::find_by_id(store, id).await? else {
            return Ok(None);
        };

        if task_list.members.contains(&user_id) {
            return Ok(Some(task_list));
        }

        task_list.members.push(user_id);
        store
            .update_fields(
                COLLECTION,
                json!({ "_id": id }),
                json!({ "members": &task_list.members }),
            )
            .await?;

        Ok(Some(task_list))
    }

    /// Deletes a task list
    ///
    /// Returns true if a document was removed. To-dos referencing the list
    /// are not cleaned up; their back-reference becomes dangling.
    pub async fn delete(store: &dyn DocumentStore, id: Uuid) -> Result<bool, StoreError> {
        let removed = store.remove(COLLECTION, json!({ "_id": id })).await?;

        Ok(removed > 0)
    }

    /// Returns true when `user_id` is in the member set
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }
}
