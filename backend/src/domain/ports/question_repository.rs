//! Port abstraction for question persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageParams;

use crate::domain::{AnswerId, Question, QuestionFilter, QuestionId, UserId, VoteOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "question repository query failed: {message}",
    }
}

/// Store of questions.
///
/// Mutations that return `Option` report `None` when the question is absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert(&self, question: &Question) -> Result<(), QuestionRepositoryError>;

    async fn find_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError>;

    /// Atomically increment the view counter and return the updated question.
    async fn increment_views(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError>;

    async fn set_ai_answer(
        &self,
        id: &QuestionId,
        ai_answer: &str,
    ) -> Result<(), QuestionRepositoryError>;

    /// Persist the editable fields (title, content, subject, grade, tags) and
    /// `updated_at`.
    async fn save_content(&self, question: &Question) -> Result<(), QuestionRepositoryError>;

    async fn set_resolved(
        &self,
        id: &QuestionId,
        resolved: bool,
        at: DateTime<Utc>,
    ) -> Result<Option<Question>, QuestionRepositoryError>;

    /// Flip the user's upvote in one store operation.
    async fn toggle_upvote(
        &self,
        id: &QuestionId,
        user: &UserId,
    ) -> Result<Option<VoteOutcome>, QuestionRepositoryError>;

    async fn append_answer(
        &self,
        id: &QuestionId,
        answer: &AnswerId,
    ) -> Result<(), QuestionRepositoryError>;

    async fn remove_answer(
        &self,
        id: &QuestionId,
        answer: &AnswerId,
    ) -> Result<(), QuestionRepositoryError>;

    /// Delete the question row. Returns `false` if it was already gone.
    async fn delete(&self, id: &QuestionId) -> Result<bool, QuestionRepositoryError>;

    /// One page of matching questions, newest first, with the total match count.
    async fn list(
        &self,
        filter: &QuestionFilter,
        page: &PageParams,
    ) -> Result<(Vec<Question>, u64), QuestionRepositoryError>;

    /// Every question by the author, newest first.
    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Question>, QuestionRepositoryError>;
}
