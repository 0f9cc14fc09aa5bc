//! Driving port for reading questions.
use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::{Error, Question, QuestionFilter, QuestionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionQuery: Send + Sync {
    /// Fetch a question and count the view.
    async fn view(&self, id: &QuestionId) -> Result<Question, Error>;

    /// Fetch a question without counting a view.
    async fn get(&self, id: &QuestionId) -> Result<Question, Error>;

    /// Filtered listing, newest first.
    async fn list(
        &self,
        filter: QuestionFilter,
        page: PageParams,
    ) -> Result<Page<Question>, Error>;

    /// Every question by the user with this email. Unknown emails yield an
    /// empty list.
    async fn list_by_author_email(&self, email: &str) -> Result<Vec<Question>, Error>;
}
