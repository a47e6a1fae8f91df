use std::sync::Arc;

use mongodb::{
    bson::doc,
    options::ReturnDocument,
    Collection, Database,
};
use uuid::Uuid;

use crate::{error::AppError, models::vote::Vote};

pub struct VoteRepository {
    votes: Collection<Vote>,
}

impl VoteRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            votes: db.collection::<Vote>("votes"),
        }
    }

    /// One atomic upsert keyed on (user, question): repoints the existing
    /// vote's choice or inserts a fresh vote. Together with the unique index
    /// on the pair, two racing submissions by the same user collapse into a
    /// single surviving document holding the last write to commit.
    pub async fn upsert_vote(
        &self,
        user_id: &str,
        question_id: &str,
        choice_id: &str,
    ) -> Result<Vote, AppError> {
        // The equality fields of the filter are copied into the document on
        // insert, so only _id needs $setOnInsert.
        let vote = self
            .votes
            .find_one_and_update(
                doc! { "user_id": user_id, "question_id": question_id },
                doc! {
                    "$set": { "choice_id": choice_id },
                    "$setOnInsert": { "_id": Uuid::new_v4().to_string() },
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(AppError::Unknown)?;
        Ok(vote)
    }

    pub async fn find_vote(
        &self,
        user_id: &str,
        question_id: &str,
    ) -> Result<Option<Vote>, AppError> {
        Ok(self
            .votes
            .find_one(doc! { "user_id": user_id, "question_id": question_id })
            .await?)
    }

    /// The tally is always recomputed from the vote documents; nothing
    /// stores a running counter that could drift.
    pub async fn count_for_choice(&self, choice_id: &str) -> Result<u64, AppError> {
        Ok(self
            .votes
            .count_documents(doc! { "choice_id": choice_id })
            .await?)
    }
}
