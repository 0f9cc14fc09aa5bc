//! Comment repository over the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{InMemoryStore, newest_first};
use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{
    AnswerId, Comment, CommentId, QuestionId, UserId, VoteOutcome, toggle_membership,
};

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        self.lock().comments.push(comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self
            .lock()
            .comments
            .iter()
            .find(|comment| comment.id == *id)
            .cloned())
    }

    async fn list_for_question(
        &self,
        question: &QuestionId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.lock();
        Ok(newest_first(
            state
                .comments
                .iter()
                .filter(|comment| comment.question == *question && comment.answer.is_none()),
            |comment| comment.created_at,
        ))
    }

    async fn list_for_answer(
        &self,
        answer: &AnswerId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.lock();
        Ok(newest_first(
            state
                .comments
                .iter()
                .filter(|comment| comment.answer == Some(*answer)),
            |comment| comment.created_at,
        ))
    }

    async fn update_content(
        &self,
        id: &CommentId,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .comments
            .iter_mut()
            .find(|comment| comment.id == *id)
            .map(|comment| {
                content.clone_into(&mut comment.content);
                comment.updated_at = at;
                comment.clone()
            }))
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, CommentRepositoryError> {
        let mut state = self.lock();
        let before = state.comments.len();
        state.comments.retain(|comment| comment.id != *id);
        Ok(state.comments.len() != before)
    }

    async fn toggle_upvote(
        &self,
        id: &CommentId,
        user: &UserId,
    ) -> Result<Option<VoteOutcome>, CommentRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .comments
            .iter_mut()
            .find(|comment| comment.id == *id)
            .map(|comment| toggle_membership(&mut comment.upvotes, user)))
    }
}
