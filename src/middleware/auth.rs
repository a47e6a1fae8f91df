use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Anonymous requests get routed into the login flow rather than a bare
/// 401, matching the flash-and-redirect style of the user-facing routes.
pub async fn require_login(req: Request, next: Next) -> Response {
    let Some(session) = req.extensions().get::<Session>().cloned() else {
        return Redirect::to("/auth/login").into_response();
    };
    match session.get::<String>("user_id").await {
        Ok(Some(_)) => next.run(req).await,
        _ => Redirect::to("/auth/login").into_response(),
    }
}
