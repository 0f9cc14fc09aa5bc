//! Answer lifecycle and the point transfers attached to it.
//!
//! | Event          | Effect                                              |
//! |----------------|-----------------------------------------------------|
//! | answer created | answerer `+stake`, asker `-stake` (no balance check) |
//! | upvote added   | answer author `+2`                                  |
//! | upvote removed | none                                                |
//! | accepted       | answer author `+10` on every call                   |
//! | answer deleted | answer author `-5`                                  |

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ledger::{
    ACCEPTANCE_BONUS, ANSWER_DELETION_PENALTY, ANSWER_UPVOTE_REWARD, PointsLedger,
};
use crate::domain::notification_service::NotificationEmitter;
use crate::domain::ports::{
    AnswerCommand, AnswerQuery, AnswerRepository, NotificationRepository, QuestionRepository,
    UserRepository,
};
use crate::domain::service_support::{
    answer_validation, ensure_owner, map_answer_error, map_question_error, map_user_error,
};
use crate::domain::{
    Answer, AnswerDraft, AnswerId, Error, NotificationDraft, NotificationKind, Question,
    QuestionId, UserId, VoteOutcome, VoteToggle, answer_content,
};

/// Service implementing [`AnswerCommand`] and [`AnswerQuery`].
pub struct AnswerService<A, Q, U, N> {
    answers: Arc<A>,
    questions: Arc<Q>,
    users: Arc<U>,
    ledger: PointsLedger<U>,
    notifications: NotificationEmitter<N>,
    clock: Arc<dyn Clock>,
}

impl<A, Q, U, N> AnswerService<A, Q, U, N> {
    pub fn new(
        answers: Arc<A>,
        questions: Arc<Q>,
        users: Arc<U>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            answers,
            questions,
            ledger: PointsLedger::new(Arc::clone(&users)),
            users,
            notifications: NotificationEmitter::new(notifications, Arc::clone(&clock)),
            clock,
        }
    }
}

impl<A, Q, U, N> AnswerService<A, Q, U, N>
where
    A: AnswerRepository,
    Q: QuestionRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn load_answer(&self, id: &AnswerId) -> Result<Answer, Error> {
        self.answers
            .find_by_id(id)
            .await
            .map_err(map_answer_error)?
            .ok_or_else(answer_not_found)
    }

    async fn load_question(&self, id: &QuestionId) -> Result<Question, Error> {
        self.questions
            .find_by_id(id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| Error::not_found("question not found"))
    }

    async fn ensure_account(&self, id: &UserId) -> Result<(), Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn notify(
        &self,
        answer: &Answer,
        recipient: &UserId,
        sender: &UserId,
        kind: NotificationKind,
    ) {
        let message = match kind {
            NotificationKind::Answer => "Someone answered your question",
            NotificationKind::Upvote => "Your answer received an upvote",
            NotificationKind::Accept => "Your answer was accepted",
            NotificationKind::Comment | NotificationKind::Verification => {
                "Activity on your answer"
            }
        };
        self.notifications
            .emit(NotificationDraft {
                recipient: recipient.clone(),
                sender: sender.clone(),
                kind,
                message: message.to_owned(),
                question: answer.question,
                answer: Some(answer.id),
                comment: None,
            })
            .await;
    }
}

fn answer_not_found() -> Error {
    Error::not_found("answer not found")
}

#[async_trait]
impl<A, Q, U, N> AnswerCommand for AnswerService<A, Q, U, N>
where
    A: AnswerRepository,
    Q: QuestionRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn create(
        &self,
        author: &UserId,
        question: &QuestionId,
        draft: AnswerDraft,
    ) -> Result<Answer, Error> {
        let question = self.load_question(question).await?;
        let draft = draft.validate().map_err(answer_validation)?;
        self.ensure_account(author).await?;
        let answer = Answer::create(
            AnswerId::random(),
            author.clone(),
            question.id,
            draft,
            self.clock.utc(),
        );
        self.answers
            .insert(&answer)
            .await
            .map_err(map_answer_error)?;
        self.questions
            .append_answer(&question.id, &answer.id)
            .await
            .map_err(map_question_error)?;

        self.ledger.credit(author, question.points).await?;
        self.ledger.debit(&question.author, question.points).await?;
        info!(
            answer_id = %answer.id,
            question_id = %question.id,
            stake = question.points,
            "answer created"
        );

        self.notify(&answer, &question.author, author, NotificationKind::Answer)
            .await;
        Ok(answer)
    }

    async fn update(
        &self,
        id: &AnswerId,
        requester: &UserId,
        content: String,
    ) -> Result<Answer, Error> {
        let answer = self.load_answer(id).await?;
        ensure_owner(&answer.author, requester, "edit this answer")?;
        // Blank edits keep the stored content.
        let Ok(content) = answer_content(&content) else {
            return Ok(answer);
        };
        self.answers
            .update_content(id, &content, self.clock.utc())
            .await
            .map_err(map_answer_error)?
            .ok_or_else(answer_not_found)
    }

    async fn delete(&self, id: &AnswerId, requester: &UserId) -> Result<(), Error> {
        let answer = self.load_answer(id).await?;
        ensure_owner(&answer.author, requester, "delete this answer")?;
        self.questions
            .remove_answer(&answer.question, id)
            .await
            .map_err(map_question_error)?;
        self.answers.delete(id).await.map_err(map_answer_error)?;
        self.ledger
            .debit(&answer.author, ANSWER_DELETION_PENALTY)
            .await?;
        info!(answer_id = %id, question_id = %answer.question, "answer deleted");
        Ok(())
    }

    async fn upvote(&self, id: &AnswerId, user: &UserId) -> Result<VoteOutcome, Error> {
        let answer = self.load_answer(id).await?;
        let outcome = self
            .answers
            .toggle_upvote(id, user)
            .await
            .map_err(map_answer_error)?
            .ok_or_else(answer_not_found)?;
        if outcome.toggle == VoteToggle::Added {
            self.ledger
                .credit(&answer.author, ANSWER_UPVOTE_REWARD)
                .await?;
            self.notify(&answer, &answer.author, user, NotificationKind::Upvote)
                .await;
        }
        Ok(outcome)
    }

    async fn accept(&self, id: &AnswerId, requester: &UserId) -> Result<Answer, Error> {
        let answer = self.load_answer(id).await?;
        let question = self.load_question(&answer.question).await?;
        ensure_owner(&question.author, requester, "accept answers to this question")?;

        let now = self.clock.utc();
        let accepted = self
            .answers
            .mark_accepted(&question.id, id, now)
            .await
            .map_err(map_answer_error)?
            .ok_or_else(answer_not_found)?;
        self.questions
            .set_resolved(&question.id, true, now)
            .await
            .map_err(map_question_error)?;
        self.ledger
            .credit(&accepted.author, ACCEPTANCE_BONUS)
            .await?;
        info!(answer_id = %id, question_id = %question.id, "answer accepted");

        self.notify(&accepted, &accepted.author, requester, NotificationKind::Accept)
            .await;
        Ok(accepted)
    }
}

#[async_trait]
impl<A, Q, U, N> AnswerQuery for AnswerService<A, Q, U, N>
where
    A: AnswerRepository,
    Q: QuestionRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn list_for_question(&self, question: &QuestionId) -> Result<Vec<Answer>, Error> {
        self.answers
            .list_for_question(question)
            .await
            .map_err(map_answer_error)
    }
}

#[cfg(test)]
#[path = "answer_service_tests.rs"]
mod tests;
