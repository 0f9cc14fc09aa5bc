//! Question lifecycle: staking, viewing, editing, resolution, deletion, and
//! listing.
//!
//! Creating a question is the only operation guarded by a balance check. The
//! stake is debited once at creation and never re-read from the author. AI
//! augmentation runs after the debit and cannot fail the request.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageParams};
use tracing::{info, warn};

use crate::domain::ledger::PointsLedger;
use crate::domain::ports::{
    AiAugmentation, AiPrompt, AnswerRepository, QuestionCommand, QuestionQuery,
    QuestionRepository, UserRepository,
};
use crate::domain::service_support::{
    ensure_owner, map_answer_error, map_question_error, map_user_error, question_validation,
};
use crate::domain::{
    EmailAddress, Error, Question, QuestionDraft, QuestionEdit, QuestionFilter, QuestionId, UserId,
    VoteOutcome,
};

/// Service implementing [`QuestionCommand`] and [`QuestionQuery`].
pub struct QuestionService<Q, A, U> {
    questions: Arc<Q>,
    answers: Arc<A>,
    users: Arc<U>,
    ledger: PointsLedger<U>,
    ai: Arc<dyn AiAugmentation>,
    clock: Arc<dyn Clock>,
}

impl<Q, A, U> QuestionService<Q, A, U> {
    pub fn new(
        questions: Arc<Q>,
        answers: Arc<A>,
        users: Arc<U>,
        ai: Arc<dyn AiAugmentation>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            questions,
            answers,
            ledger: PointsLedger::new(Arc::clone(&users)),
            users,
            ai,
            clock,
        }
    }
}

impl<Q, A, U> QuestionService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn load(&self, id: &QuestionId) -> Result<Question, Error> {
        self.questions
            .find_by_id(id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(question_not_found)
    }

    async fn load_owned(
        &self,
        id: &QuestionId,
        requester: &UserId,
        action: &str,
    ) -> Result<Question, Error> {
        let question = self.load(id).await?;
        ensure_owner(&question.author, requester, action)?;
        Ok(question)
    }

    async fn set_resolved(
        &self,
        id: &QuestionId,
        requester: &UserId,
        resolved: bool,
    ) -> Result<Question, Error> {
        let action = if resolved {
            "resolve this question"
        } else {
            "reopen this question"
        };
        self.load_owned(id, requester, action).await?;
        let question = self
            .questions
            .set_resolved(id, resolved, self.clock.utc())
            .await
            .map_err(map_question_error)?
            .ok_or_else(question_not_found)?;
        info!(question_id = %id, resolved, "question resolution changed");
        Ok(question)
    }

    /// Ask the AI hook for a draft answer and store it on the question.
    ///
    /// Failures are logged and leave `ai_answer` unset.
    async fn augment(&self, mut question: Question) -> Question {
        let prompt = AiPrompt::for_question(&question);
        let draft = match self.ai.generate(&prompt).await {
            Ok(draft) => draft,
            Err(error) => {
                warn!(question_id = %question.id, error = %error, "AI augmentation failed");
                return question;
            }
        };
        match self.questions.set_ai_answer(&question.id, &draft).await {
            Ok(()) => question.ai_answer = Some(draft),
            Err(error) => {
                warn!(question_id = %question.id, error = %error, "failed to store AI answer");
            }
        }
        question
    }
}

fn question_not_found() -> Error {
    Error::not_found("question not found")
}

#[async_trait]
impl<Q, A, U> QuestionCommand for QuestionService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn create(&self, author: &UserId, draft: QuestionDraft) -> Result<Question, Error> {
        let input = draft.validate().map_err(question_validation)?;
        let stake = input.stake.get();
        let user = self
            .users
            .find_by_id(author)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if user.points < i64::from(stake) {
            return Err(Error::insufficient_points(stake, user.points));
        }

        let question =
            Question::create(QuestionId::random(), author.clone(), input, self.clock.utc());
        self.questions
            .insert(&question)
            .await
            .map_err(map_question_error)?;
        self.ledger.debit(author, stake).await?;
        info!(question_id = %question.id, author = %author, stake, "question created");

        Ok(self.augment(question).await)
    }

    async fn update(
        &self,
        id: &QuestionId,
        requester: &UserId,
        edit: QuestionEdit,
    ) -> Result<Question, Error> {
        let mut question = self.load_owned(id, requester, "edit this question").await?;
        edit.apply_to(&mut question, self.clock.utc())
            .map_err(question_validation)?;
        self.questions
            .save_content(&question)
            .await
            .map_err(map_question_error)?;
        Ok(question)
    }

    async fn resolve(&self, id: &QuestionId, requester: &UserId) -> Result<Question, Error> {
        self.set_resolved(id, requester, true).await
    }

    async fn unresolve(&self, id: &QuestionId, requester: &UserId) -> Result<Question, Error> {
        self.set_resolved(id, requester, false).await
    }

    async fn delete(&self, id: &QuestionId, requester: &UserId) -> Result<(), Error> {
        self.load_owned(id, requester, "delete this question").await?;
        let answers = self
            .answers
            .list_for_question(id)
            .await
            .map_err(map_answer_error)?;
        for answer in &answers {
            self.answers
                .delete(&answer.id)
                .await
                .map_err(map_answer_error)?;
        }
        self.questions.delete(id).await.map_err(map_question_error)?;
        info!(question_id = %id, answers = answers.len(), "question deleted");
        Ok(())
    }

    async fn upvote(&self, id: &QuestionId, user: &UserId) -> Result<VoteOutcome, Error> {
        self.questions
            .toggle_upvote(id, user)
            .await
            .map_err(map_question_error)?
            .ok_or_else(question_not_found)
    }
}

#[async_trait]
impl<Q, A, U> QuestionQuery for QuestionService<Q, A, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    U: UserRepository,
{
    async fn view(&self, id: &QuestionId) -> Result<Question, Error> {
        self.questions
            .increment_views(id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(question_not_found)
    }

    async fn get(&self, id: &QuestionId) -> Result<Question, Error> {
        self.load(id).await
    }

    async fn list(
        &self,
        filter: QuestionFilter,
        page: PageParams,
    ) -> Result<Page<Question>, Error> {
        let (items, total) = self
            .questions
            .list(&filter, &page)
            .await
            .map_err(map_question_error)?;
        Ok(Page::new(items, total, page))
    }

    async fn list_by_author_email(&self, email: &str) -> Result<Vec<Question>, Error> {
        let Ok(email) = EmailAddress::new(email) else {
            return Ok(Vec::new());
        };
        let Some(user) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
        else {
            return Ok(Vec::new());
        };
        self.questions
            .list_by_author(&user.id)
            .await
            .map_err(map_question_error)
    }
}

#[cfg(test)]
#[path = "question_service_tests.rs"]
mod tests;
