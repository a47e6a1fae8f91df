use std::sync::Arc;

use chrono::{DateTime, Utc};
use mongodb::Database;
use tracing::info;

use crate::{
    error::{AppError, PollError},
    models::choice::Choice,
    repositories::{question_repository::QuestionRepository, vote_repository::VoteRepository},
};

pub struct VoteService {
    questions: QuestionRepository,
    votes: VoteRepository,
}

impl VoteService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            questions: QuestionRepository::new(db.clone()),
            votes: VoteRepository::new(db),
        }
    }

    /// Resolves a vote intent into exactly one stored vote for the
    /// (user, question) pair. Nothing is written on any error path.
    ///
    /// Returns the selected choice for confirmation messaging.
    pub async fn cast_vote(
        &self,
        question_id: &str,
        choice_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Choice, AppError> {
        let question = self
            .questions
            .get_question(question_id)
            .await?
            .ok_or(PollError::QuestionNotFound)?;

        if !question.can_vote(now) {
            return Err(PollError::VotingClosed.into());
        }

        let choice = self
            .questions
            .get_choice(choice_id)
            .await?
            .filter(|choice| choice.question_id == question.question_id)
            .ok_or(PollError::InvalidChoice)?;

        let vote = self
            .votes
            .upsert_vote(user_id, question_id, &choice.choice_id)
            .await?;
        info!(user_id, question_id, choice_id = %vote.choice_id, "vote recorded");

        Ok(choice)
    }
}
