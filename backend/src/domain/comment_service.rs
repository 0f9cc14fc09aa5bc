//! Comments, comment votes, and reader verification of AI answers.
//!
//! Nothing here moves points.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::notification_service::NotificationEmitter;
use crate::domain::ports::{
    AiVerdict, AnswerRepository, CommentCommand, CommentQuery, CommentRepository, NewComment,
    NotificationRepository, QuestionRepository,
};
use crate::domain::service_support::{
    comment_validation, ensure_owner, map_answer_error, map_comment_error, map_question_error,
};
use crate::domain::{
    AiVerification, Answer, AnswerId, Comment, CommentId, CommentTarget, Error,
    NotificationDraft, NotificationKind, QuestionId, UserId, VoteOutcome, comment_content,
};

/// Service implementing [`CommentCommand`] and [`CommentQuery`].
pub struct CommentService<C, A, Q, N> {
    comments: Arc<C>,
    answers: Arc<A>,
    questions: Arc<Q>,
    notifications: NotificationEmitter<N>,
    clock: Arc<dyn Clock>,
}

impl<C, A, Q, N> CommentService<C, A, Q, N> {
    pub fn new(
        comments: Arc<C>,
        answers: Arc<A>,
        questions: Arc<Q>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            comments,
            answers,
            questions,
            notifications: NotificationEmitter::new(notifications, Arc::clone(&clock)),
            clock,
        }
    }
}

impl<C, A, Q, N> CommentService<C, A, Q, N>
where
    C: CommentRepository,
    A: AnswerRepository,
    Q: QuestionRepository,
    N: NotificationRepository,
{
    async fn load_comment(&self, id: &CommentId) -> Result<Comment, Error> {
        self.comments
            .find_by_id(id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)
    }

    async fn load_answer(&self, id: &AnswerId) -> Result<Answer, Error> {
        self.answers
            .find_by_id(id)
            .await
            .map_err(map_answer_error)?
            .ok_or_else(|| Error::not_found("answer not found"))
    }

    /// Resolve who hears about a new comment: the answer author for answer
    /// threads, the asker otherwise.
    async fn comment_recipient(&self, target: &CommentTarget) -> Result<UserId, Error> {
        let question = self
            .questions
            .find_by_id(&target.question)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| Error::not_found("question not found"))?;
        let Some(answer_id) = target.answer else {
            return Ok(question.author);
        };
        let answer = self.load_answer(&answer_id).await?;
        if answer.question != question.id {
            return Err(Error::not_found("answer not found"));
        }
        Ok(answer.author)
    }
}

fn comment_not_found() -> Error {
    Error::not_found("comment not found")
}

#[async_trait]
impl<C, A, Q, N> CommentCommand for CommentService<C, A, Q, N>
where
    C: CommentRepository,
    A: AnswerRepository,
    Q: QuestionRepository,
    N: NotificationRepository,
{
    async fn create(&self, author: &UserId, comment: NewComment) -> Result<Comment, Error> {
        let target = CommentTarget {
            question: comment.question,
            answer: comment.answer,
            parent_comment: comment.parent_comment,
        };
        let recipient = self.comment_recipient(&target).await?;
        if let Some(parent) = target.parent_comment {
            self.load_comment(&parent).await?;
        }
        let content = comment_content(&comment.content).map_err(comment_validation)?;

        let comment = Comment::create(
            CommentId::random(),
            author.clone(),
            target,
            content,
            self.clock.utc(),
        );
        self.comments
            .insert(&comment)
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id, question_id = %comment.question, "comment created");

        let message = if comment.answer.is_some() {
            "New comment on your answer"
        } else {
            "New comment on your question"
        };
        self.notifications
            .emit(NotificationDraft {
                recipient,
                sender: author.clone(),
                kind: NotificationKind::Comment,
                message: message.to_owned(),
                question: comment.question,
                answer: comment.answer,
                comment: Some(comment.id),
            })
            .await;
        Ok(comment)
    }

    async fn update(
        &self,
        id: &CommentId,
        requester: &UserId,
        content: String,
    ) -> Result<Comment, Error> {
        let comment = self.load_comment(id).await?;
        ensure_owner(&comment.author, requester, "edit this comment")?;
        let content = comment_content(&content).map_err(comment_validation)?;
        self.comments
            .update_content(id, &content, self.clock.utc())
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)
    }

    async fn delete(&self, id: &CommentId, requester: &UserId) -> Result<(), Error> {
        let comment = self.load_comment(id).await?;
        ensure_owner(&comment.author, requester, "delete this comment")?;
        self.comments.delete(id).await.map_err(map_comment_error)?;
        Ok(())
    }

    async fn upvote(&self, id: &CommentId, user: &UserId) -> Result<VoteOutcome, Error> {
        self.comments
            .toggle_upvote(id, user)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(comment_not_found)
    }

    async fn verify_ai(
        &self,
        answer: &AnswerId,
        requester: &UserId,
        verdict: AiVerdict,
    ) -> Result<Answer, Error> {
        let target = self.load_answer(answer).await?;
        if !target.is_ai {
            return Err(Error::invalid_operation("this is not an AI answer"));
        }
        let verification = AiVerification {
            user: requester.clone(),
            is_correct: verdict.is_correct,
            feedback: verdict
                .feedback
                .map(|feedback| feedback.trim().to_owned())
                .filter(|feedback| !feedback.is_empty()),
            created_at: self.clock.utc(),
        };
        let verified = self
            .answers
            .add_verification(answer, &verification)
            .await
            .map_err(map_answer_error)?
            .ok_or_else(|| Error::not_found("answer not found"))?;
        info!(answer_id = %answer, is_correct = verdict.is_correct, "AI answer verified");

        let message = if verdict.is_correct {
            "Your AI answer was marked correct"
        } else {
            "Your AI answer was marked incorrect"
        };
        self.notifications
            .emit(NotificationDraft {
                recipient: verified.author.clone(),
                sender: requester.clone(),
                kind: NotificationKind::Verification,
                message: message.to_owned(),
                question: verified.question,
                answer: Some(verified.id),
                comment: None,
            })
            .await;
        Ok(verified)
    }
}

#[async_trait]
impl<C, A, Q, N> CommentQuery for CommentService<C, A, Q, N>
where
    C: CommentRepository,
    A: AnswerRepository,
    Q: QuestionRepository,
    N: NotificationRepository,
{
    async fn list_for_question(&self, question: &QuestionId) -> Result<Vec<Comment>, Error> {
        self.comments
            .list_for_question(question)
            .await
            .map_err(map_comment_error)
    }

    async fn list_for_answer(&self, answer: &AnswerId) -> Result<Vec<Comment>, Error> {
        self.comments
            .list_for_answer(answer)
            .await
            .map_err(map_comment_error)
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
