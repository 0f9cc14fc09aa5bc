//! Answer repository over the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{InMemoryStore, newest_first};
use crate::domain::ports::{AnswerRepository, AnswerRepositoryError};
use crate::domain::{
    AiVerification, Answer, AnswerId, QuestionId, UserId, VoteOutcome, toggle_membership,
};

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerRepositoryError> {
        self.lock().answers.push(answer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerRepositoryError> {
        Ok(self
            .lock()
            .answers
            .iter()
            .find(|answer| answer.id == *id)
            .cloned())
    }

    async fn list_for_question(
        &self,
        question: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let state = self.lock();
        Ok(newest_first(
            state.answers.iter().filter(|answer| answer.question == *question),
            |answer| answer.created_at,
        ))
    }

    async fn update_content(
        &self,
        id: &AnswerId,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .answers
            .iter_mut()
            .find(|answer| answer.id == *id)
            .map(|answer| {
                content.clone_into(&mut answer.content);
                answer.updated_at = at;
                answer.clone()
            }))
    }

    async fn delete(&self, id: &AnswerId) -> Result<bool, AnswerRepositoryError> {
        let mut state = self.lock();
        let before = state.answers.len();
        state.answers.retain(|answer| answer.id != *id);
        Ok(state.answers.len() != before)
    }

    async fn toggle_upvote(
        &self,
        id: &AnswerId,
        user: &UserId,
    ) -> Result<Option<VoteOutcome>, AnswerRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .answers
            .iter_mut()
            .find(|answer| answer.id == *id)
            .map(|answer| toggle_membership(&mut answer.upvotes, user)))
    }

    async fn mark_accepted(
        &self,
        question: &QuestionId,
        answer: &AnswerId,
        at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut state = self.lock();
        let belongs = state
            .answers
            .iter()
            .any(|candidate| candidate.id == *answer && candidate.question == *question);
        if !belongs {
            return Ok(None);
        }
        let mut accepted = None;
        for candidate in state
            .answers
            .iter_mut()
            .filter(|candidate| candidate.question == *question)
        {
            candidate.is_accepted = candidate.id == *answer;
            if candidate.is_accepted {
                candidate.updated_at = at;
                accepted = Some(candidate.clone());
            }
        }
        Ok(accepted)
    }

    async fn add_verification(
        &self,
        id: &AnswerId,
        verification: &AiVerification,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .answers
            .iter_mut()
            .find(|answer| answer.id == *id)
            .map(|answer| {
                answer.verifications.push(verification.clone());
                answer.clone()
            }))
    }
}
