/// GraphQL schema for the NitroCollab API
///
/// # Modules
///
/// - [`types`]: object and input types mirroring the client-facing schema
/// - [`query`]: `myTaskLists`, `getTaskList`
/// - [`mutation`]: sign-up/sign-in and the task-list/to-do mutations
/// - [`gate`]: the access gate applied in front of every protected resolver
///
/// # Request context
///
/// The schema carries three pieces of shared data: the document store, the
/// token signing secret, and the access policy. The acting user is resolved
/// per request (from the bearer token) and injected as [`CurrentUser`]
/// before execution.
pub mod gate;
pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};
use nitrocollab_shared::models::user::User;
use nitrocollab_shared::store::SharedStore;

use crate::config::AccessPolicy;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// The executable GraphQL schema
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Request-scoped acting user
///
/// `None` marks an anonymous request: no token, or a token that failed to
/// resolve. The gate decides whether that is acceptable per operation.
pub struct CurrentUser(pub Option<User>);

/// Process-wide token signing secret, stored in schema data
pub struct TokenSecret(pub String);

/// Builds the schema with its shared data
///
/// # Example
///
/// ```no_run
/// use nitrocollab_api::config::AccessPolicy;
/// use nitrocollab_api::schema::build_schema;
/// use nitrocollab_shared::store::{MemoryStore, SharedStore};
/// use std::sync::Arc;
///
/// let store: SharedStore = Arc::new(MemoryStore::new());
/// let schema = build_schema(store, "secret".to_string(), AccessPolicy::default());
/// ```
pub fn build_schema(store: SharedStore, secret: String, policy: AccessPolicy) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(TokenSecret(secret))
        .data(policy)
        .finish()
}
