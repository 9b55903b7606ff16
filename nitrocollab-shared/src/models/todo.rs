/// To-do item model and document operations
///
/// A to-do belongs to exactly one task list via `task_list_id`. The reference
/// is not validated at creation time and the list may be deleted afterwards,
/// so consumers must treat it as possibly dangling.
///
/// # Document shape
///
/// ```json
/// {
///   "_id": "uuid",
///   "content": "Buy milk",
///   "is_completed": false,
///   "task_list_id": "uuid"
/// }
/// ```
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::store::{DocumentStore, StoreError};

/// Collection holding to-do documents
pub const COLLECTION: &str = "todos";

/// A single to-do item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToDo {
    /// Unique to-do ID (UUID v4)
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Free-text content
    pub content: String,

    /// Completion flag
    pub is_completed: bool,

    /// Owning task list (possibly dangling)
    pub task_list_id: Uuid,
}

/// Input for creating a new to-do
#[derive(Debug, Clone)]
pub struct CreateToDo {
    /// Free-text content
    pub content: String,

    /// Owning task list id; existence is not checked here
    pub task_list_id: Uuid,
}

/// Partial update for a to-do
///
/// Only the supplied fields are written; `None` leaves the stored value
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateToDo {
    /// New content
    pub content: Option<String>,

    /// New completion flag
    pub is_completed: Option<bool>,
}

impl ToDo {
    /// Creates a new to-do with `is_completed = false`
    pub async fn create(store: &dyn DocumentStore, data: CreateToDo) -> Result<Self, StoreError> {
        let todo = Self {
            id: Uuid::new_v4(),
            content: data.content,
            is_completed: false,
            task_list_id: data.task_list_id,
        };

        store.insert(COLLECTION, serde_json::to_value(&todo)?).await?;

        Ok(todo)
    }

    /// Finds a to-do by ID
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: Uuid,
    ) -> Result<Option<Self>, StoreError> {
        let found = store.find_one(COLLECTION, json!({ "_id": id })).await?;

        found.map(|doc| serde_json::from_value(doc).map_err(Into::into)).transpose()
    }

    /// Lists the to-dos of a task list, in insertion order
    pub async fn list_by_task_list(
        store: &dyn DocumentStore,
        task_list_id: Uuid,
    ) -> Result<Vec<Self>, StoreError> {
        let found = store
            .find_many(COLLECTION, json!({ "task_list_id": task_list_id }))
            .await?;

        found
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .collect()
    }

    /// Applies a partial update and returns the post-update record
    ///
    /// Returns `None` if the to-do does not exist. The write and the re-read
    /// are separate store operations (best-effort, not serializable).
    pub async fn update(
        store: &dyn DocumentStore,
        id: Uuid,
        patch: UpdateToDo,
    ) -> Result<Option<Self>, StoreError> {
        let mut fields = Map::new();
        if let Some(content) = patch.content {
            fields.insert("content".to_string(), Value::String(content));
        }
        if let Some(is_completed) = patch.is_completed {
            fields.insert("is_completed".to_string(), Value::Bool(is_completed));
        }

        if !fields.is_empty() {
            let matched = store
                .update_fields(COLLECTION, json!({ "_id": id }), Value::Object(fields))
                .await?;
            if matched == 0 {
                return Ok(None);
            }
        }

        Self::find_by_id(store, id).await
    }

    /// Deletes a to-do, returning true if a document was removed
    pub async fn delete(store: &dyn DocumentStore, id: Uuid) -> Result<bool, StoreError> {
        let removed = store.remove(COLLECTION, json!({ "_id": id })).await?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn create_todo(store: &MemoryStore, list: Uuid, content: &str) -> ToDo {
        ToDo::create(
            store,
            CreateToDo {
                content: content.to_string(),
                task_list_id: list,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_starts_incomplete() {
        let store = MemoryStore::new();
        let list = Uuid::new_v4();

        let todo = create_todo(&store, list, "Milk").await;

        assert_eq!(todo.content, "Milk");
        assert!(!todo.is_completed);
        assert_eq!(todo.task_list_id, list);
    }

    #[tokio::test]
    async fn test_list_by_task_list_in_insertion_order() {
        let store = MemoryStore::new();
        let list = Uuid::new_v4();

        create_todo(&store, list, "Milk").await;
        create_todo(&store, list, "Eggs").await;
        create_todo(&store, Uuid::new_v4(), "Other list").await;

        let todos = ToDo::list_by_task_list(&store, list).await.unwrap();
        let contents: Vec<&str> = todos.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["Milk", "Eggs"]);
    }

    #[tokio::test]
    async fn test_update_applies_only_supplied_fields() {
        let store = MemoryStore::new();
        let todo = create_todo(&store, Uuid::new_v4(), "Milk").await;

        let flagged = ToDo::update(
            &store,
            todo.id,
            UpdateToDo {
                is_completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert!(flagged.is_completed);
        assert_eq!(flagged.content, "Milk", "content must be unchanged");

        let renamed = ToDo::update(
            &store,
            todo.id,
            UpdateToDo {
                content: Some("Oat milk".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(renamed.content, "Oat milk");
        assert!(renamed.is_completed, "flag must be unchanged");
    }

    #[tokio::test]
    async fn test_update_empty_patch_returns_current() {
        let store = MemoryStore::new();
        let todo = create_todo(&store, Uuid::new_v4(), "Milk").await;

        let same = ToDo::update(&store, todo.id, UpdateToDo::default()).await.unwrap().unwrap();
        assert_eq!(same.content, "Milk");
        assert!(!same.is_completed);
    }

    #[tokio::test]
    async fn test_update_missing_todo() {
        let store = MemoryStore::new();
        let result = ToDo::update(
            &store,
            Uuid::new_v4(),
            UpdateToDo {
                is_completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let todo = create_todo(&store, Uuid::new_v4(), "Milk").await;

        assert!(ToDo::delete(&store, todo.id).await.unwrap());
        assert!(!ToDo::delete(&store, todo.id).await.unwrap());
    }
}
