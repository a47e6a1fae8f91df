use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};
use chrono::Utc;
use mongodb::Database;
use tower_sessions::Session;
use tracing::info;

use crate::{
    dtos::{
        requests::LoginRequest,
        responses::{ApiResponse, CurrentUserDTO},
    },
    error::AppError,
    repositories::user_repository::UserRepository,
};

/// Get-or-create login: the poll service treats identity as a collaborator
/// concern, so all this does is tie a session to a user document.
//?POST:: auth/login
pub async fn login(
    Extension(db): Extension<Arc<Database>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<CurrentUserDTO>>, AppError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidUsername);
    }

    let user = UserRepository::new(db).get_or_create(username).await?;

    session.insert("user_id", &user.user_id).await?;
    session.insert("username", &user.username).await?;
    info!(username = %user.username, "user logged in");

    Ok(Json(ApiResponse {
        status: StatusCode::OK.as_u16() as i32,
        message: String::from("Logged in successfully"),
        data: Some(CurrentUserDTO {
            user_id: user.user_id,
            username: user.username,
        }),
        timestamp: Utc::now(),
        error: None,
    }))
}

/// Target of the unauthenticated-vote redirect.
//*GET:: auth/login
pub async fn login_prompt() -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        status: StatusCode::OK.as_u16() as i32,
        message: String::from("Log in by sending a POST with a username to this endpoint"),
        data: None,
        timestamp: Utc::now(),
        error: None,
    })
}

//?POST:: auth/logout
pub async fn logout(session: Session) -> Result<Json<ApiResponse<()>>, AppError> {
    session.flush().await?;

    Ok(Json(ApiResponse {
        status: StatusCode::OK.as_u16() as i32,
        message: String::from("Logged out successfully"),
        data: None,
        timestamp: Utc::now(),
        error: None,
    }))
}

//*GET:: auth/me
pub async fn current_user(
    Extension(db): Extension<Arc<Database>>,
    session: Session,
) -> Result<Json<ApiResponse<CurrentUserDTO>>, AppError> {
    let user_id = session
        .get::<String>("user_id")
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let user = UserRepository::new(db)
        .get_user(&user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    Ok(Json(ApiResponse {
        status: StatusCode::OK.as_u16() as i32,
        message: String::from("User fetched successfully"),
        data: Some(CurrentUserDTO {
            user_id: user.user_id,
            username: user.username,
        }),
        timestamp: Utc::now(),
        error: None,
    }))
}
