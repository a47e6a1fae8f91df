use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controller::{current_user, login, login_prompt, logout};

pub fn auth_router() -> Router {
    Router::new()
        .route("/login", get(login_prompt).post(login))
        .route("/logout", post(logout))
        .route("/me", get(current_user))
}
