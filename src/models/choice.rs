use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One selectable answer. The parent question never changes after creation,
/// and the vote tally is always derived by counting, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(rename = "_id")]
    pub choice_id: String,
    /// References `_id` in the questions collection.
    pub question_id: String,
    pub choice_text: String,
}

impl Choice {
    pub fn new(question_id: impl Into<String>, choice_text: impl Into<String>) -> Self {
        Self {
            choice_id: Uuid::new_v4().to_string(),
            question_id: question_id.into(),
            choice_text: choice_text.into(),
        }
    }
}
