use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    controllers::poll_controller::{index, question_detail, question_results, submit_vote},
    middleware::auth::require_login,
};

pub fn poll_router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/{question_id}", get(question_detail))
        .route("/{question_id}/results", get(question_results))
        .route(
            "/{question_id}/vote",
            post(submit_vote).route_layer(axum::middleware::from_fn(require_login)),
        )
}
