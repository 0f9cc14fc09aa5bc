//! Driving port for reading answers.
use async_trait::async_trait;

use crate::domain::{Answer, Error, QuestionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerQuery: Send + Sync {
    /// Answers to the question, newest first.
    async fn list_for_question(&self, question: &QuestionId) -> Result<Vec<Answer>, Error>;
}
