//! Question repository over the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageParams;

use super::{InMemoryStore, newest_first};
use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{
    AnswerId, Question, QuestionFilter, QuestionId, UserId, VoteOutcome, toggle_membership,
};

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn insert(&self, question: &Question) -> Result<(), QuestionRepositoryError> {
        self.lock().questions.push(question.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        Ok(self
            .lock()
            .questions
            .iter()
            .find(|question| question.id == *id)
            .cloned())
    }

    async fn increment_views(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .questions
            .iter_mut()
            .find(|question| question.id == *id)
            .map(|question| {
                question.views += 1;
                question.clone()
            }))
    }

    async fn set_ai_answer(
        &self,
        id: &QuestionId,
        ai_answer: &str,
    ) -> Result<(), QuestionRepositoryError> {
        let mut state = self.lock();
        if let Some(question) = state.questions.iter_mut().find(|question| question.id == *id) {
            question.ai_answer = Some(ai_answer.to_owned());
        }
        Ok(())
    }

    async fn save_content(&self, edited: &Question) -> Result<(), QuestionRepositoryError> {
        let mut state = self.lock();
        if let Some(question) = state
            .questions
            .iter_mut()
            .find(|question| question.id == edited.id)
        {
            question.title.clone_from(&edited.title);
            question.content.clone_from(&edited.content);
            question.subject.clone_from(&edited.subject);
            question.grade.clone_from(&edited.grade);
            question.tags.clone_from(&edited.tags);
            question.updated_at = edited.updated_at;
        }
        Ok(())
    }

    async fn set_resolved(
        &self,
        id: &QuestionId,
        resolved: bool,
        at: DateTime<Utc>,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .questions
            .iter_mut()
            .find(|question| question.id == *id)
            .map(|question| {
                question.is_resolved = resolved;
                question.updated_at = at;
                question.clone()
            }))
    }

    async fn toggle_upvote(
        &self,
        id: &QuestionId,
        user: &UserId,
    ) -> Result<Option<VoteOutcome>, QuestionRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .questions
            .iter_mut()
            .find(|question| question.id == *id)
            .map(|question| toggle_membership(&mut question.upvotes, user)))
    }

    async fn append_answer(
        &self,
        id: &QuestionId,
        answer: &AnswerId,
    ) -> Result<(), QuestionRepositoryError> {
        let mut state = self.lock();
        if let Some(question) = state.questions.iter_mut().find(|question| question.id == *id) {
            question.answers.push(*answer);
        }
        Ok(())
    }

    async fn remove_answer(
        &self,
        id: &QuestionId,
        answer: &AnswerId,
    ) -> Result<(), QuestionRepositoryError> {
        let mut state = self.lock();
        if let Some(question) = state.questions.iter_mut().find(|question| question.id == *id) {
            question.answers.retain(|existing| existing != answer);
        }
        Ok(())
    }

    async fn delete(&self, id: &QuestionId) -> Result<bool, QuestionRepositoryError> {
        let mut state = self.lock();
        let before = state.questions.len();
        state.questions.retain(|question| question.id != *id);
        Ok(state.questions.len() != before)
    }

    async fn list(
        &self,
        filter: &QuestionFilter,
        page: &PageParams,
    ) -> Result<(Vec<Question>, u64), QuestionRepositoryError> {
        let state = self.lock();
        let matching = newest_first(
            state.questions.iter().filter(|question| filter.matches(question)),
            |question| question.created_at,
        );
        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(page.limit() as usize)
            .collect();
        Ok((items, total))
    }

    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let state = self.lock();
        Ok(newest_first(
            state.questions.iter().filter(|question| question.author == *author),
            |question| question.created_at,
        ))
    }
}
