//! Port abstraction for answer persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AiVerification, Answer, AnswerId, QuestionId, UserId, VoteOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by answer repository adapters.
    pub enum AnswerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "answer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "answer repository query failed: {message}",
    }
}

/// Store of answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerRepositoryError>;

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerRepositoryError>;

    /// Answers to the question, newest first.
    async fn list_for_question(
        &self,
        question: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError>;

    async fn update_content(
        &self,
        id: &AnswerId,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError>;

    async fn delete(&self, id: &AnswerId) -> Result<bool, AnswerRepositoryError>;

    async fn toggle_upvote(
        &self,
        id: &AnswerId,
        user: &UserId,
    ) -> Result<Option<VoteOutcome>, AnswerRepositoryError>;

    /// Mark `answer` accepted and every other answer to `question` not
    /// accepted, as one store operation.
    ///
    /// Returns the accepted answer, or `None` if it does not belong to the
    /// question.
    async fn mark_accepted(
        &self,
        question: &QuestionId,
        answer: &AnswerId,
        at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError>;

    async fn add_verification(
        &self,
        id: &AnswerId,
        verification: &AiVerification,
    ) -> Result<Option<Answer>, AnswerRepositoryError>;
}
