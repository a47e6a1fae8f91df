use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Something went wrong that we haven't classified yet")]
    Unknown,

    // Authentication & Session Errors
    #[error("Invalid session state: {0}")]
    InvalidSessionState(#[from] tower_sessions::session::Error),
    #[error("Not logged in")]
    Unauthenticated,
    #[error("Invalid username format")]
    InvalidUsername,

    // Database Errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    // Poll Errors
    #[error("Poll error: {0}")]
    Poll(#[from] PollError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("Question not found")]
    QuestionNotFound,

    #[error("Voting is closed for this question")]
    VotingClosed,

    #[error("That choice does not belong to this question")]
    InvalidChoice,
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_string = self.to_string();
        let (status, error_message) = match self {
            // Authentication & Session Errors
            AppError::InvalidSessionState(_) => (StatusCode::BAD_REQUEST, "Invalid Session State"),
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Not Logged In"),
            AppError::InvalidUsername => (StatusCode::BAD_REQUEST, "Invalid Username Format"),

            // Database Errors
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database Error"),

            // Poll Errors
            AppError::Poll(poll_err) => match poll_err {
                PollError::QuestionNotFound => (StatusCode::NOT_FOUND, "Question Not Found"),
                PollError::VotingClosed => (StatusCode::FORBIDDEN, "Voting Is Closed"),
                PollError::InvalidChoice => (StatusCode::BAD_REQUEST, "Invalid Choice"),
            },

            AppError::Unknown => (StatusCode::INTERNAL_SERVER_ERROR, "Unknown Error"),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "message": error_message,
            "error": error_string,
            "timestamp": chrono::Utc::now()
        }));

        (status, body).into_response()
    }
}
