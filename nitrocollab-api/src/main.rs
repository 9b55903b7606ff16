//! # NitroCollab API Server
//!
//! GraphQL API for the NitroCollab collaborative to-do product: user
//! accounts, shared task lists, and to-do items over a MongoDB document
//! store.
//!
//! ## Usage
//!
//! ```bash
//! DB_URI=mongodb://localhost:27017 DB_NAME=nitrocollab \
//! JWT_SECRET=$(openssl rand -hex 32) cargo run -p nitrocollab-api
//! ```

use std::sync::Arc;

use nitrocollab_api::app::{build_router, AppState};
use nitrocollab_api::config::Config;
use nitrocollab_shared::store::{MongoStore, SharedStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nitrocollab_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "NitroCollab API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let store: SharedStore = Arc::new(
        MongoStore::connect(&config.database.uri, &config.database.name).await?,
    );

    let bind_address = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);
    tracing::info!("GraphiQL available at http://{}/graphql", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
