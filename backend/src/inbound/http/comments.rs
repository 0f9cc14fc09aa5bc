//! Comment and AI-verification HTTP handlers.
//!
//! ```text
//! GET    /api/v1/comments/question/{questionId}
//! GET    /api/v1/comments/answer/{answerId}
//! POST   /api/v1/comments
//! PUT    /api/v1/comments/{id}
//! DELETE /api/v1/comments/{id}
//! POST   /api/v1/comments/{id}/upvote
//! POST   /api/v1/comments/verify-ai/{answerId}
//! ```
//!
//! Comments carry no points.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AiVerdict, NewComment};
use crate::domain::{Answer, AnswerId, Comment, CommentId, QuestionId, VoteOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AnswerSchema, CommentSchema, ErrorSchema, VoteOutcomeSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_optional_id, require};

const COMMENT_ID: FieldName = FieldName::new("id");
const QUESTION_ID: FieldName = FieldName::new("questionId");
const ANSWER_ID: FieldName = FieldName::new("answerId");
const PARENT_COMMENT_ID: FieldName = FieldName::new("parentCommentId");

/// Payload for posting a comment on a question or one of its answers.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub question_id: Option<String>,
    /// Set to comment on an answer instead of the question.
    pub answer_id: Option<String>,
    pub parent_comment_id: Option<String>,
    /// At most 500 characters.
    pub content: String,
}

impl CreateCommentRequest {
    fn parse(self) -> ApiResult<NewComment> {
        let question = require(self.question_id, QUESTION_ID)?;
        Ok(NewComment {
            question: parse_id::<QuestionId>(&question, QUESTION_ID)?,
            answer: parse_optional_id(self.answer_id.as_deref(), ANSWER_ID)?,
            parent_comment: parse_optional_id(self.parent_comment_id.as_deref(), PARENT_COMMENT_ID)?,
            content: self.content,
        })
    }
}

/// Payload for editing a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// A reader's verdict on an AI-authored answer.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAiRequest {
    pub is_correct: bool,
    pub feedback: Option<String>,
}

impl From<VerifyAiRequest> for AiVerdict {
    fn from(value: VerifyAiRequest) -> Self {
        Self {
            is_correct: value.is_correct,
            feedback: value.feedback,
        }
    }
}

/// Comments on the question itself, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/comments/question/{questionId}",
    params(("questionId" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question comments", body = [CommentSchema]),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listQuestionComments",
    security([])
)]
#[get("/comments/question/{question_id}")]
pub async fn list_question_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let question: QuestionId = parse_id(&path, QUESTION_ID)?;
    let comments = state.comments_query.list_for_question(&question).await?;
    Ok(web::Json(comments))
}

/// Comments on one answer, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/comments/answer/{answerId}",
    params(("answerId" = String, Path, description = "Answer id")),
    responses(
        (status = 200, description = "Answer comments", body = [CommentSchema]),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listAnswerComments",
    security([])
)]
#[get("/comments/answer/{answer_id}")]
pub async fn list_answer_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let answer: AnswerId = parse_id(&path, ANSWER_ID)?;
    let comments = state.comments_query.list_for_answer(&answer).await?;
    Ok(web::Json(comments))
}

/// Post a comment and notify the owner of the target.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment posted", body = CommentSchema),
        (status = 400, description = "Invalid comment", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Question, answer, or parent comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment",
    security(("SessionCookie" = []))
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let comment = payload.into_inner().parse()?;
    let created = state.comments.create(&user_id, comment).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace the content of the requester's own comment.
#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Updated comment", body = CommentSchema),
        (status = 400, description = "Invalid content", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "updateComment",
    security(("SessionCookie" = []))
)]
#[put("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateCommentRequest>,
) -> ApiResult<web::Json<Comment>> {
    let user_id = session.require_user_id()?;
    let id: CommentId = parse_id(&path, COMMENT_ID)?;
    let comment = state
        .comments
        .update(&id, &user_id, payload.into_inner().content)
        .await?;
    Ok(web::Json(comment))
}

/// Delete the requester's own comment.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment",
    security(("SessionCookie" = []))
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id: CommentId = parse_id(&path, COMMENT_ID)?;
    state.comments.delete(&id, &user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Toggle the requester's upvote on a comment.
#[utoipa::path(
    post,
    path = "/api/v1/comments/{id}/upvote",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Vote toggled", body = VoteOutcomeSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "upvoteComment",
    security(("SessionCookie" = []))
)]
#[post("/comments/{id}/upvote")]
pub async fn upvote_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VoteOutcome>> {
    let user_id = session.require_user_id()?;
    let id: CommentId = parse_id(&path, COMMENT_ID)?;
    let outcome = state.comments.upvote(&id, &user_id).await?;
    Ok(web::Json(outcome))
}

/// Record a verdict on an AI-authored answer.
#[utoipa::path(
    post,
    path = "/api/v1/comments/verify-ai/{answerId}",
    params(("answerId" = String, Path, description = "Answer id")),
    request_body = VerifyAiRequest,
    responses(
        (status = 200, description = "Answer with the verdict appended", body = AnswerSchema),
        (status = 400, description = "Answer was written by a person", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "verifyAiAnswer",
    security(("SessionCookie" = []))
)]
#[post("/comments/verify-ai/{answer_id}")]
pub async fn verify_ai_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<VerifyAiRequest>,
) -> ApiResult<web::Json<Answer>> {
    let user_id = session.require_user_id()?;
    let answer: AnswerId = parse_id(&path, ANSWER_ID)?;
    let verified = state
        .comments
        .verify_ai(&answer, &user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(verified))
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
