//! Driving port for answer mutations and the point transfers they trigger.
use async_trait::async_trait;

use crate::domain::{Answer, AnswerDraft, AnswerId, Error, QuestionId, UserId, VoteOutcome};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerCommand: Send + Sync {
    /// Answer a question. The answerer gains the question's stake and the
    /// asker loses it.
    async fn create(
        &self,
        author: &UserId,
        question: &QuestionId,
        draft: AnswerDraft,
    ) -> Result<Answer, Error>;

    /// Replace the content of the requester's own answer.
    async fn update(
        &self,
        id: &AnswerId,
        requester: &UserId,
        content: String,
    ) -> Result<Answer, Error>;

    /// Delete the requester's own answer, charging the deletion penalty.
    async fn delete(&self, id: &AnswerId, requester: &UserId) -> Result<(), Error>;

    /// Toggle an upvote. Adding one rewards the answer author.
    async fn upvote(&self, id: &AnswerId, user: &UserId) -> Result<VoteOutcome, Error>;

    /// Accept the answer on behalf of the question author.
    async fn accept(&self, id: &AnswerId, requester: &UserId) -> Result<Answer, Error>;
}
