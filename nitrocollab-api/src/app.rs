/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use nitrocollab_api::app::{build_router, AppState};
/// use nitrocollab_api::config::Config;
/// use nitrocollab_shared::store::{MongoStore, SharedStore};
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let store: SharedStore =
///     Arc::new(MongoStore::connect(&config.database.uri, &config.database.name).await?);
/// let state = AppState::new(store, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```
use axum::routing::get;
use axum::Router;
use nitrocollab_shared::store::SharedStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::Config;
use crate::routes;
use crate::schema::{build_schema, AppSchema};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The schema
/// and store are reference-counted internally, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Executable GraphQL schema
    pub schema: AppSchema,

    /// Document store handle
    pub store: SharedStore,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state and builds the schema from it
    pub fn new(store: SharedStore, config: Config) -> Self {
        let schema = build_schema(store.clone(), config.jwt.secret.clone(), config.access);

        Self {
            schema,
            store,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health          # Health check (public)
/// └── /graphql         # GraphQL endpoint
///     ├── GET          # GraphiQL page
///     └── POST         # Operation execution
/// ```
///
/// Authentication is not a router-level concern: the GraphQL handler
/// resolves the bearer token into an optional acting user, and each resolver
/// applies the access gate itself. This keeps `signUp`/`signIn` on the same
/// endpoint as the protected operations.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/graphql",
            get(routes::graphql::graphiql).post(routes::graphql::graphql_handler),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The mobile client is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
