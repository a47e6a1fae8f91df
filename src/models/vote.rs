use serde::{Deserialize, Serialize};

/// A user's current selection for a question. The votes collection carries a
/// unique index on (user_id, question_id), so at most one of these exists
/// per user per question; repeat submissions repoint `choice_id` in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "_id")]
    pub vote_id: String,
    pub user_id: String,
    pub question_id: String,
    pub choice_id: String,
}
