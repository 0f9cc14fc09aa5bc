//! Driving port for comments and AI answer verification.
use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, Comment, CommentId, Error, QuestionId, UserId, VoteOutcome};

/// Unvalidated comment input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub question: QuestionId,
    pub answer: Option<AnswerId>,
    pub parent_comment: Option<CommentId>,
    pub content: String,
}

/// A reader's verdict on an AI-authored answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiVerdict {
    pub is_correct: bool,
    pub feedback: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    async fn create(&self, author: &UserId, comment: NewComment) -> Result<Comment, Error>;

    async fn update(
        &self,
        id: &CommentId,
        requester: &UserId,
        content: String,
    ) -> Result<Comment, Error>;

    async fn delete(&self, id: &CommentId, requester: &UserId) -> Result<(), Error>;

    /// Toggle an upvote. Comment votes carry no points.
    async fn upvote(&self, id: &CommentId, user: &UserId) -> Result<VoteOutcome, Error>;

    /// Record a verdict on an AI answer.
    ///
    /// # Errors
    ///
    /// `invalid_operation` when the answer was written by a person.
    async fn verify_ai(
        &self,
        answer: &AnswerId,
        requester: &UserId,
        verdict: AiVerdict,
    ) -> Result<Answer, Error>;
}
