/// GraphQL object and input types
///
/// Thin wrappers over the shared models that fix the client-facing field
/// names and resolve the derived fields (`TaskList.users`, `TaskList.todos`,
/// `ToDo.taskList`). Field names follow GraphQL camelCase conventions
/// (`createdAt`, `isCompleted`).
use async_graphql::{Context, InputObject, Object, Result as GqlResult, SimpleObject, ID};
use futures::future;
use nitrocollab_shared::models::task_list::TaskList;
use nitrocollab_shared::models::todo::ToDo;
use nitrocollab_shared::models::user::User;
use nitrocollab_shared::store::SharedStore;
use uuid::Uuid;

use crate::error::to_graphql;

/// Parses a GraphQL ID into a store id
///
/// An unparseable id can never match a stored document, so callers treat
/// `None` the same way they treat an unknown id.
pub(crate) fn parse_id(id: &ID) -> Option<Uuid> {
    Uuid::parse_str(id.as_str()).ok()
}

/// Sign-up input
#[derive(Debug, InputObject)]
pub struct SignUpInput {
    /// Display name
    pub name: String,

    /// Email address, unique across accounts
    pub email: String,

    /// Plaintext password; hashed before it ever reaches the store
    pub password: String,

    /// Optional avatar image reference
    pub avatar: Option<String>,
}

/// Sign-in input
#[derive(Debug, InputObject)]
pub struct SignInInput {
    /// Email address
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// A user account, as exposed to clients
///
/// The password hash never leaves the server.
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn avatar(&self) -> Option<&str> {
        self.0.avatar.as_deref()
    }
}

/// Result of a successful sign-up or sign-in
#[derive(SimpleObject)]
#[graphql(name = "AuthUser")]
pub struct AuthUser {
    /// The authenticated account
    pub user: UserObject,

    /// Bearer token for subsequent requests, valid for 7 days
    pub token: String,
}

/// A shared task list
pub struct TaskListObject(pub TaskList);

#[Object(name = "TaskList")]
impl TaskListObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn created_at(&self) -> String {
        self.0.created_at.to_rfc3339()
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    /// Completion progress of the list
    ///
    /// Not computed yet; clients receive a constant 0 until the formula is
    /// settled with the product side.
    async fn progress(&self) -> f64 {
        0.0
    }

    /// The member users, in member-set order
    ///
    /// Members are fetched concurrently; ids that no longer resolve to an
    /// account are skipped.
    async fn users(&self, ctx: &Context<'_>) -> GqlResult<Vec<UserObject>> {
        let store = ctx.data::<SharedStore>()?;

        let lookups = self
            .0
            .members
            .iter()
            .map(|member_id| User::find_by_id(store.as_ref(), *member_id));
        let members = future::try_join_all(lookups).await.map_err(to_graphql)?;

        Ok(members.into_iter().flatten().map(UserObject).collect())
    }

    /// The list's to-do items, in insertion order
    async fn todos(&self, ctx: &Context<'_>) -> GqlResult<Vec<ToDoObject>> {
        let store = ctx.data::<SharedStore>()?;

        let todos = ToDo::list_by_task_list(store.as_ref(), self.0.id)
            .await
            .map_err(to_graphql)?;

        Ok(todos.into_iter().map(ToDoObject).collect())
    }
}

/// A single to-do item
pub struct ToDoObject(pub ToDo);

#[Object(name = "ToDo")]
impl ToDoObject {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn is_completed(&self) -> bool {
        self.0.is_completed
    }

    /// The owning task list, or null if the reference is dangling
    async fn task_list(&self, ctx: &Context<'_>) -> GqlResult<Option<TaskListObject>> {
        let store = ctx.data::<SharedStore>()?;

        let task_list = TaskList::find_by_id(store.as_ref(), self.0.task_list_id)
            .await
            .map_err(to_graphql)?;

        Ok(task_list.map(TaskListObject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let uuid = Uuid::new_v4();
        assert_eq!(parse_id(&ID(uuid.to_string())), Some(uuid));
        assert_eq!(parse_id(&ID("not-a-uuid".to_string())), None);
        assert_eq!(parse_id(&ID(String::new())), None);
    }
}
