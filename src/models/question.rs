use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::datetime::{bson_datetime, bson_datetime_option};

/// A poll prompt. Immutable after creation except for `closes_at`.
///
/// The eligibility predicates take `now` explicitly so they stay pure
/// functions of wall-clock time and can be tested without a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub question_id: String,
    pub question_text: String,
    #[serde(with = "bson_datetime")]
    pub pub_date: DateTime<Utc>,
    /// Voting stays open indefinitely when unset.
    #[serde(with = "bson_datetime_option", default)]
    pub closes_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(question_text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            question_id: Uuid::new_v4().to_string(),
            question_text: question_text.into(),
            pub_date,
            closes_at: None,
        }
    }

    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        now >= self.pub_date
    }

    /// Published and, when a close time is set, not yet past it.
    pub fn can_vote(&self, now: DateTime<Utc>) -> bool {
        self.is_published(now) && self.closes_at.is_none_or(|closes_at| now <= closes_at)
    }

    /// Published within the past 24 hours, both boundaries inclusive.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }
}
