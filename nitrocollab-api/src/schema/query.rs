/// Query resolvers
///
/// Both queries are protected: the gate runs before any store access.
use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, ID};
use nitrocollab_shared::models::task_list::TaskList;
use nitrocollab_shared::store::SharedStore;

use crate::config::AccessPolicy;
use crate::error::to_graphql;

use super::gate;
use super::types::{parse_id, TaskListObject};

/// Root query type
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Task lists whose member set contains the acting user
    async fn my_task_lists(&self, ctx: &Context<'_>) -> GqlResult<Vec<TaskListObject>> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;

        let task_lists = TaskList::list_by_member(store.as_ref(), user.id)
            .await
            .map_err(to_graphql)?;

        Ok(task_lists.into_iter().map(TaskListObject).collect())
    }

    /// A task list by id, or null if it does not exist
    ///
    /// Under the default policy any authenticated user may read any list;
    /// with membership enforcement on, non-members are rejected.
    async fn get_task_list(&self, ctx: &Context<'_>, id: ID) -> GqlResult<Option<TaskListObject>> {
        let user = gate::require_user(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<SharedStore>()?;
        let policy = *ctx.data::<AccessPolicy>()?;

        let Some(task_list_id) = parse_id(&id) else {
            return Ok(None);
        };

        let Some(task_list) = TaskList::find_by_id(store.as_ref(), task_list_id)
            .await
            .map_err(to_graphql)?
        else {
            return Ok(None);
        };

        gate::require_list_member(policy, &task_list, user).map_err(|e| e.extend())?;

        Ok(Some(TaskListObject(task_list)))
    }
}
