/// Common test utilities for integration tests
///
/// Provides a `TestContext` that backs the GraphQL schema with the in-memory
/// document store. Operations are executed through the schema the same way
/// the HTTP handler does it: the bearer token (when given) is resolved into
/// an acting user first, then injected into the request data.
use async_graphql::Request;
use nitrocollab_api::config::AccessPolicy;
use nitrocollab_api::schema::{build_schema, AppSchema, CurrentUser};
use nitrocollab_shared::auth::identity;
use nitrocollab_shared::store::{MemoryStore, SharedStore};
use std::sync::Arc;

/// Signing secret shared by every test
pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing the schema and direct store access
pub struct TestContext {
    pub schema: AppSchema,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    /// Creates a context with the default (open) access policy
    pub fn new() -> Self {
        Self::with_policy(AccessPolicy::default())
    }

    /// Creates a context with an explicit access policy
    pub fn with_policy(policy: AccessPolicy) -> Self {
        let store = Arc::new(MemoryStore::new());
        let shared: SharedStore = store.clone();
        let schema = build_schema(shared, JWT_SECRET.to_string(), policy);

        Self { schema, store }
    }

    /// Executes an operation anonymously (no bearer token)
    pub async fn execute(&self, query: &str) -> serde_json::Value {
        self.execute_with(query, None).await
    }

    /// Executes an operation with a bearer token
    pub async fn execute_as(&self, token: &str, query: &str) -> serde_json::Value {
        self.execute_with(query, Some(token)).await
    }

    async fn execute_with(&self, query: &str, token: Option<&str>) -> serde_json::Value {
        let current_user = identity::resolve_user(token, JWT_SECRET, self.store.as_ref())
            .await
            .expect("identity resolution should not fail on MemoryStore");

        let request = Request::new(query).data(CurrentUser(current_user));
        let response = self.schema.execute(request).await;

        serde_json::to_value(&response).expect("response should serialize")
    }

    /// Signs up a fresh user via the API, returning (user id, token)
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> (String, String) {
        let query = format!(
            r#"mutation {{
                signUp(input: {{ name: "{name}", email: "{email}", password: "{password}" }}) {{
                    user {{ id }}
                    token
                }}
            }}"#
        );

        let response = self.execute(&query).await;
        let auth = &response["data"]["signUp"];

        (
            auth["user"]["id"].as_str().expect("user id").to_string(),
            auth["token"].as_str().expect("token").to_string(),
        )
    }

    /// Creates a task list via the API, returning its id
    pub async fn create_task_list(&self, token: &str, title: &str) -> String {
        let query = format!(r#"mutation {{ createTaskList(title: "{title}") {{ id }} }}"#);
        let response = self.execute_as(token, &query).await;

        response["data"]["createTaskList"]["id"]
            .as_str()
            .expect("task list id")
            .to_string()
    }
}

/// First error code extension in a response, if any
pub fn error_code(response: &serde_json::Value) -> Option<&str> {
    response["errors"][0]["extensions"]["code"].as_str()
}
