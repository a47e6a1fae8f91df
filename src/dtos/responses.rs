use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::flash::FlashMessage;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserDTO {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDTO {
    pub latest_question_list: Vec<QuestionSummaryDTO>,
    /// The "No polls are available." indicator for the index template.
    pub no_polls_available: bool,
    pub messages: Vec<FlashMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummaryDTO {
    pub question_id: String,
    pub question_text: String,
    pub pub_date: String,
    pub published_recently: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetailDTO {
    pub question_id: String,
    pub question_text: String,
    pub pub_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<String>,
    pub choices: Vec<ChoiceDTO>,
    /// The requesting user's current selection, when logged in and voted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_choice_id: Option<String>,
    pub messages: Vec<FlashMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDTO {
    pub choice_id: String,
    pub choice_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsDTO {
    pub question_id: String,
    pub question_text: String,
    /// True for unpublished questions as well as those past their close
    /// time.
    pub voting_closed: bool,
    pub results: Vec<ChoiceResultDTO>,
    pub messages: Vec<FlashMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceResultDTO {
    pub choice_id: String,
    pub choice_text: String,
    pub votes: i64,
}
