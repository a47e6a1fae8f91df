use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Deserialize, Clone)]
pub struct VoteForm {
    /// Absent when the form is submitted without picking a choice.
    pub choice: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct ResultQueryParams {
    pub live: Option<bool>,
}
