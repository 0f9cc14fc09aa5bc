//! Driving port for question mutations.
use async_trait::async_trait;

use crate::domain::{Error, Question, QuestionDraft, QuestionEdit, QuestionId, UserId, VoteOutcome};

/// Mutating question operations invoked by inbound adapters.
///
/// Operations taking a `requester` are restricted to the question author and
/// fail with [`crate::domain::ErrorCode::Forbidden`] otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionCommand: Send + Sync {
    /// Post a question, debiting the author by the normalised stake.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when the draft fails validation.
    /// - `not_found` when the author does not exist.
    /// - `insufficient_points` when the balance is below the stake. Nothing
    ///   is persisted or debited in that case.
    async fn create(&self, author: &UserId, draft: QuestionDraft) -> Result<Question, Error>;

    /// Edit title, content, subject, grade, or tags.
    async fn update(
        &self,
        id: &QuestionId,
        requester: &UserId,
        edit: QuestionEdit,
    ) -> Result<Question, Error>;

    async fn resolve(&self, id: &QuestionId, requester: &UserId) -> Result<Question, Error>;

    async fn unresolve(&self, id: &QuestionId, requester: &UserId) -> Result<Question, Error>;

    /// Delete the question and every answer to it. Balances are untouched.
    async fn delete(&self, id: &QuestionId, requester: &UserId) -> Result<(), Error>;

    /// Toggle the user's upvote. Has no point effect.
    async fn upvote(&self, id: &QuestionId, user: &UserId) -> Result<VoteOutcome, Error>;
}
