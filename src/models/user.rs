use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::datetime::bson_datetime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub username: String,
    #[serde(with = "bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}
