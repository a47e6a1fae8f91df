use std::sync::Arc;

use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    Collection, Database,
};
use tokio_stream::StreamExt;
use tracing::info;

use crate::{
    error::AppError,
    models::{choice::Choice, question::Question, vote::Vote},
};

pub struct QuestionRepository {
    questions: Collection<Question>,
    choices: Collection<Choice>,
    votes: Collection<Vote>,
}

impl QuestionRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            questions: db.collection::<Question>("questions"),
            choices: db.collection::<Choice>("choices"),
            votes: db.collection::<Vote>("votes"),
        }
    }

    pub async fn create_question(&self, question: &Question) -> Result<(), AppError> {
        self.questions.insert_one(question).await?;
        Ok(())
    }

    pub async fn add_choice(&self, choice: &Choice) -> Result<(), AppError> {
        self.choices.insert_one(choice).await?;
        Ok(())
    }

    pub async fn get_question(&self, question_id: &str) -> Result<Option<Question>, AppError> {
        Ok(self.questions.find_one(doc! { "_id": question_id }).await?)
    }

    /// Published questions in reverse chronological order. Ties in
    /// `pub_date` come back in store order. `limit` of `None` means
    /// unlimited.
    pub async fn latest_published(
        &self,
        now: DateTime<Utc>,
        limit: Option<i64>,
    ) -> Result<Vec<Question>, AppError> {
        let filter = doc! {
            "pub_date": { "$lte": BsonDateTime::from_millis(now.timestamp_millis()) }
        };
        let mut find = self.questions.find(filter).sort(doc! { "pub_date": -1 });
        if let Some(limit) = limit {
            find = find.limit(limit);
        }
        let mut cursor = find.await?;
        let mut questions = Vec::new();
        while let Some(question) = cursor.next().await {
            questions.push(question?);
        }
        Ok(questions)
    }

    pub async fn choices_for_question(&self, question_id: &str) -> Result<Vec<Choice>, AppError> {
        let mut cursor = self.choices.find(doc! { "question_id": question_id }).await?;
        let mut choices = Vec::new();
        while let Some(choice) = cursor.next().await {
            choices.push(choice?);
        }
        Ok(choices)
    }

    pub async fn get_choice(&self, choice_id: &str) -> Result<Option<Choice>, AppError> {
        Ok(self.choices.find_one(doc! { "_id": choice_id }).await?)
    }

    /// Application-level cascade: the choices and votes referencing the
    /// question go with it.
    pub async fn delete_question(&self, question_id: &str) -> Result<(), AppError> {
        self.votes
            .delete_many(doc! { "question_id": question_id })
            .await?;
        self.choices
            .delete_many(doc! { "question_id": question_id })
            .await?;
        self.questions.delete_one(doc! { "_id": question_id }).await?;
        info!(question_id, "question deleted with its choices and votes");
        Ok(())
    }
}
