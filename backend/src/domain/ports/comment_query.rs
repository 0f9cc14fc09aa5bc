//! Driving port for reading comments.
use async_trait::async_trait;

use crate::domain::{AnswerId, Comment, Error, QuestionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// Comments made on the question itself, newest first.
    async fn list_for_question(&self, question: &QuestionId) -> Result<Vec<Comment>, Error>;

    /// Comments on one answer, newest first.
    async fn list_for_answer(&self, answer: &AnswerId) -> Result<Vec<Comment>, Error>;
}
