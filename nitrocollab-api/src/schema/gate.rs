/// Access gate for protected operations
///
/// Every query and mutation except `signUp` and `signIn` starts by calling
/// [`require_user`]: no resolved identity, no operation. The membership
/// checks below are a second, optional layer, applied only when
/// [`AccessPolicy::enforce_membership`] is set; by default any authenticated
/// user may act on any list.
use async_graphql::Context;
use nitrocollab_shared::models::task_list::TaskList;
use nitrocollab_shared::models::user::User;
use nitrocollab_shared::store::DocumentStore;
use uuid::Uuid;

use crate::config::AccessPolicy;
use crate::error::ApiError;

use super::CurrentUser;

/// Returns the acting user, or fails with `Unauthenticated`
///
/// The sole precondition in front of every protected resolver.
pub fn require_user<'ctx>(ctx: &Context<'ctx>) -> Result<&'ctx User, ApiError> {
    ctx.data_opt::<CurrentUser>()
        .and_then(|current| current.0.as_ref())
        .ok_or(ApiError::Unauthenticated)
}

/// Verifies the acting user may touch `task_list` under the given policy
///
/// A no-op unless membership enforcement is enabled.
pub fn require_list_member(
    policy: AccessPolicy,
    task_list: &TaskList,
    user: &User,
) -> Result<(), ApiError> {
    if policy.enforce_membership && !task_list.is_member(user.id) {
        return Err(ApiError::Forbidden);
    }

    Ok(())
}

/// Verifies the acting user may touch to-dos under the list `task_list_id`
///
/// With enforcement off this performs no store access at all; to-dos may
/// reference lists that never existed. With enforcement on, the parent list
/// must exist (`NotFound` otherwise) and the acting user must be a member.
pub async fn require_todo_access(
    store: &dyn DocumentStore,
    policy: AccessPolicy,
    task_list_id: Uuid,
    user: &User,
) -> Result<(), ApiError> {
    if !policy.enforce_membership {
        return Ok(());
    }

    let task_list = TaskList::find_by_id(store, task_list_id)
        .await?
        .ok_or(ApiError::NotFound("Task list"))?;

    if !task_list.is_member(user.id) {
        return Err(ApiError::Forbidden);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nitrocollab_shared::models::task_list::CreateTaskList;
    use nitrocollab_shared::store::MemoryStore;

    fn user(id: Uuid) -> User {
        User {
            id,
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            avatar: None,
            created_at: Utc::now(),
        }
    }

    fn list_with_member(member: Uuid) -> TaskList {
        TaskList {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            created_at: Utc::now(),
            members: vec![member],
        }
    }

    #[test]
    fn test_require_list_member_open_policy() {
        let policy = AccessPolicy {
            enforce_membership: false,
        };
        let stranger = user(Uuid::new_v4());
        let list = list_with_member(Uuid::new_v4());

        assert!(require_list_member(policy, &list, &stranger).is_ok());
    }

    #[test]
    fn test_require_list_member_enforced() {
        let policy = AccessPolicy {
            enforce_membership: true,
        };
        let member_id = Uuid::new_v4();
        let list = list_with_member(member_id);

        assert!(require_list_member(policy, &list, &user(member_id)).is_ok());
        assert!(matches!(
            require_list_member(policy, &list, &user(Uuid::new_v4())),
            Err(ApiError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_require_todo_access_open_policy_skips_lookup() {
        let store = MemoryStore::new();
        let policy = AccessPolicy {
            enforce_membership: false,
        };

        // The referenced list does not exist; with the open policy that is fine
        let result =
            require_todo_access(&store, policy, Uuid::new_v4(), &user(Uuid::new_v4())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_require_todo_access_enforced() {
        let store = MemoryStore::new();
        let policy = AccessPolicy {
            enforce_membership: true,
        };
        let member = user(Uuid::new_v4());
        let list = TaskList::create(
            &store,
            CreateTaskList {
                title: "T".to_string(),
                creator: member.id,
            },
        )
        .await
        .unwrap();

        assert!(require_todo_access(&store, policy, list.id, &member).await.is_ok());

        let stranger = user(Uuid::new_v4());
        assert!(matches!(
            require_todo_access(&store, policy, list.id, &stranger).await,
            Err(ApiError::Forbidden)
        ));

        // Dangling parent list
        assert!(matches!(
            require_todo_access(&store, policy, Uuid::new_v4(), &member).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
