use std::sync::Arc;

use axum::{Extension, Router};
use mongodb::Database;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{
    config::{cors::init_cors, startup::AppState},
    routes::{auth_route::auth_router, poll_route::poll_router},
};

/// Shared by `main` and the integration tests so both exercise the same
/// router and layering.
pub fn create_app(
    db: Arc<Database>,
    app_state: AppState,
    session_layer: SessionManagerLayer<MemoryStore>,
) -> Router {
    Router::new()
        .nest("/api/polls", poll_router())
        .nest("/auth", auth_router())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(db))
        .layer(Extension(app_state))
        .layer(init_cors())
}
