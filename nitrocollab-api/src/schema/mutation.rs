/// Mutation resolvers
///
/// `signUp` and `signIn` are the only unauthenticated operations; everything
/// else runs behind the gate. Store writes are plain document operations
/// with no transaction spanning two of them, so concurrent writers get
/// best-effort, last-write-wins semantics.
use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, ID};
use nitrocollab_shared::auth::{jwt, password};
use nitrocollab_shared::models::task_list::{CreateTaskList, TaskList};
use nitrocollab_shared::models::todo::{CreateToDo, ToDo, UpdateToDo};
use nitrocollab_shared::models::user::{CreateUser, User};
use nitrocollab_shared::store::SharedStore;
use tracing::info;

use crate::config::AccessPolicy;
use crate::error::{to_graphql, ApiError};

use super::gate;
use super::types::{parse_id, AuthUser, SignInInput, SignUpInput, TaskListObject, ToDoObject, UserObject};
use super::TokenSecret;

/// Root mutation type
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Registers a new account and signs it in
    ///
    /// Fails with `ALREADY_EXISTS` when the email is taken; the existing
    /// account is left untouched.
    async fn sign_up(&self, ctx: &Context<'_>, input: SignUpInput) -> GqlResult<AuthUser> {
        let store = ctx.data::<SharedStore>()?;
        let secret = ctx.data::<TokenSecret>()?;

        if User::find_by_email(store.as_ref(), &input.email)
            .await
            .map_err(to_graphql)?
            .is_some()
        {
            return Err(ApiError::AlreadyExists.extend());
        }

        let password_hash = password::hash_password(&input.password).map_err(to_graphql)?;

        let user = User::create(
            store.as_ref(),
            CreateUser {
                name: input.name,
                email: input.email,
                password_hash,
                avatar: input.avatar,
            },
        )
        .await
        .map_err(to_graphql)?;

        let token = jwt::create_token(&jwt::Claims::new(user.id), &secret.0).map_err(to_graphql)?;

        info!(user_id = %user.id, "New user signed up");

        Ok(AuthUser {
            user: UserObject(user),
            token,
        })
    }

    /// Authenticates an existing account
    ///
    /// A wrong email and a wrong password fail identically with
    /// `INVALID_CREDENTIALS`; no token is issued either way.
    async fn sign_in(&self, ctx: &Context<'_>, input: SignInInput) -> GqlResult<AuthUser> {
        let store = ctx.data::<SharedStore>()?;
        let secret = ctx.data::<TokenSecret>()?;

        let Some(user) = User::find_by_email(store.as_ref(), &input.email)
            .await
            .map_err(to_graphql)?
        else {
            return Err(ApiError::InvalidCredentials.extend());
        };

        let valid =
            password::verify_password(&input.password, &user.password_hash).map_err(to_graphql)?;
        if !valid {
            return Err(ApiError::InvalidCredentials.extend());
        }

        let token = jwt::create_token(&jwt::Claims::new(user.id), &secret.0).map_err(to_graphql)?;

        Ok(AuthUser {
            user: UserObject(user),
            token,
        })
    }

    /// Creates a task list with the acting user as its sole member
    async fn create_task_list(&self, ctx: &Context<'_>, title: String) -> GqlResult<TaskListObject> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;

        let task_list = TaskList::create(
            store.as_ref(),
            CreateTaskList {
                title,
                creator: user.id,
            },
        )
        .await
        .map_err(to_graphql)?;

        Ok(TaskListObject(task_list))
    }

    /// Overwrites the title of a task list
    async fn update_task_list(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: String,
    ) -> GqlResult<TaskListObject> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;
        let policy = *ctx.data::<AccessPolicy>()?;

        let task_list_id =
            parse_id(&id).ok_or_else(|| ApiError::NotFound("Task list").extend())?;

        if policy.enforce_membership {
            let task_list = TaskList::find_by_id(store.as_ref(), task_list_id)
                .await
                .map_err(to_graphql)?
                .ok_or_else(|| ApiError::NotFound("Task list").extend())?;
            gate::require_list_member(policy, &task_list, user).map_err(|e| e.extend())?;
        }

        let updated = TaskList::set_title(store.as_ref(), task_list_id, &title)
            .await
            .map_err(to_graphql)?
            .ok_or_else(|| ApiError::NotFound("Task list").extend())?;

        Ok(TaskListObject(updated))
    }

    /// Deletes a task list
    ///
    /// To-dos under the list are not removed; their back-reference becomes
    /// dangling.
    async fn delete_task_list(&self, ctx: &Context<'_>, id: ID) -> GqlResult<bool> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;
        let policy = *ctx.data::<AccessPolicy>()?;

        let task_list_id =
            parse_id(&id).ok_or_else(|| ApiError::NotFound("Task list").extend())?;

        if policy.enforce_membership {
            let task_list = TaskList::find_by_id(store.as_ref(), task_list_id)
                .await
                .map_err(to_graphql)?
                .ok_or_else(|| ApiError::NotFound("Task list").extend())?;
            gate::require_list_member(policy, &task_list, user).map_err(|e| e.extend())?;
        }

        TaskList::delete(store.as_ref(), task_list_id)
            .await
            .map_err(to_graphql)?;

        Ok(true)
    }

    /// Adds a user to a task list's member set
    ///
    /// Idempotent: adding an existing member returns the current state.
    /// Returns null when the task list does not exist.
    async fn add_user_to_task_list(
        &self,
        ctx: &Context<'_>,
        task_list_id: ID,
        user_id: ID,
    ) -> GqlResult<Option<TaskListObject>> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;
        let policy = *ctx.data::<AccessPolicy>()?;

        let (Some(list_id), Some(member_id)) = (parse_id(&task_list_id), parse_id(&user_id))
        else {
            return Ok(None);
        };

        if policy.enforce_membership {
            let Some(task_list) = TaskList::find_by_id(store.as_ref(), list_id)
                .await
                .map_err(to_graphql)?
            else {
                return Ok(None);
            };
            gate::require_list_member(policy, &task_list, user).map_err(|e| e.extend())?;
        }

        let updated = TaskList::add_member(store.as_ref(), list_id, member_id)
            .await
            .map_err(to_graphql)?;

        Ok(updated.map(TaskListObject))
    }

    /// Creates a to-do under a task list, initially not completed
    ///
    /// Under the default policy the referenced list is not checked for
    /// existence, so the reference may dangle from the start.
    async fn create_to_do(
        &self,
        ctx: &Context<'_>,
        content: String,
        task_list_id: ID,
    ) -> GqlResult<ToDoObject> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;
        let policy = *ctx.data::<AccessPolicy>()?;

        let list_id =
            parse_id(&task_list_id).ok_or_else(|| ApiError::NotFound("Task list").extend())?;

        gate::require_todo_access(store.as_ref(), policy, list_id, user)
            .await
            .map_err(|e| e.extend())?;

        let todo = ToDo::create(
            store.as_ref(),
            CreateToDo {
                content,
                task_list_id: list_id,
            },
        )
        .await
        .map_err(to_graphql)?;

        Ok(ToDoObject(todo))
    }

    /// Applies a partial update to a to-do
    ///
    /// Only the supplied arguments are written; omitted ones keep their
    /// stored value.
    async fn update_to_do(
        &self,
        ctx: &Context<'_>,
        id: ID,
        content: Option<String>,
        is_completed: Option<bool>,
    ) -> GqlResult<ToDoObject> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;
        let policy = *ctx.data::<AccessPolicy>()?;

        let todo_id = parse_id(&id).ok_or_else(|| ApiError::NotFound("To-do").extend())?;

        if policy.enforce_membership {
            let todo = ToDo::find_by_id(store.as_ref(), todo_id)
                .await
                .map_err(to_graphql)?
                .ok_or_else(|| ApiError::NotFound("To-do").extend())?;
            gate::require_todo_access(store.as_ref(), policy, todo.task_list_id, user)
                .await
                .map_err(|e| e.extend())?;
        }

        let updated = ToDo::update(
            store.as_ref(),
            todo_id,
            UpdateToDo {
                content,
                is_completed,
            },
        )
        .await
        .map_err(to_graphql)?
        .ok_or_else(|| ApiError::NotFound("To-do").extend())?;

        Ok(ToDoObject(updated))
    }

    /// Deletes a to-do
    async fn delete_to_do(&self, ctx: &Context<'_>, id: ID) -> GqlResult<bool> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;
        let policy = *ctx.data::<AccessPolicy>()?;

        let todo_id = parse_id(&id).ok_or_else(|| ApiError::NotFound("To-do").extend())?;

        if policy.enforce_membership {
            let todo = ToDo::find_by_id(store.as_ref(), todo_id)
                .await
                .map_err(to_graphql)?
                .ok_or_else(|| ApiError::NotFound("To-do").extend())?;
            gate::require_todo_access(store.as_ref(), policy, todo.task_list_id, user)
                .await
                .map_err(|e| e.extend())?;
        }

        ToDo::delete(store.as_ref(), todo_id)
            .await
            .map_err(to_graphql)?;

        Ok(true)
    }
}
