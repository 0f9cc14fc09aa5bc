//! Port abstraction for comment persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AnswerId, Comment, CommentId, QuestionId, UserId, VoteOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Comments made directly on the question (no answer reference), newest first.
    async fn list_for_question(
        &self,
        question: &QuestionId,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Comments on the answer, newest first.
    async fn list_for_answer(
        &self,
        answer: &AnswerId,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;

    async fn update_content(
        &self,
        id: &CommentId,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    async fn delete(&self, id: &CommentId) -> Result<bool, CommentRepositoryError>;

    async fn toggle_upvote(
        &self,
        id: &CommentId,
        user: &UserId,
    ) -> Result<Option<VoteOutcome>, CommentRepositoryError>;
}
