//! Answer HTTP handlers.
//!
//! ```text
//! GET    /api/v1/answers/question/{questionId}
//! POST   /api/v1/answers
//! PUT    /api/v1/answers/{id}
//! DELETE /api/v1/answers/{id}
//! POST   /api/v1/answers/{id}/upvote
//! POST   /api/v1/answers/{id}/accept
//! ```
//!
//! Answering moves the question's stake from asker to answerer. Upvotes and
//! acceptance pay the answer author; deleting an answer costs its author.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Answer, AnswerDraft, AnswerId, AttachmentMeta, QuestionId, VoteOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AnswerSchema, ErrorSchema, VoteOutcomeSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require};

const ANSWER_ID: FieldName = FieldName::new("id");
const QUESTION_ID: FieldName = FieldName::new("questionId");

/// Metadata of a file uploaded alongside an answer.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRequest {
    #[schema(example = "1727740800000-notes.pdf")]
    pub filename: String,
    #[schema(example = "notes.pdf")]
    pub original_name: String,
    #[schema(example = "application/pdf")]
    pub mimetype: String,
    pub size: u64,
    #[schema(example = "uploads/answers/1727740800000-notes.pdf")]
    pub path: String,
}

impl From<AttachmentRequest> for AttachmentMeta {
    fn from(value: AttachmentRequest) -> Self {
        Self {
            filename: value.filename,
            original_name: value.original_name,
            mimetype: value.mimetype,
            size: value.size,
            path: value.path,
        }
    }
}

/// Payload for answering a question.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    pub question_id: Option<String>,
    pub content: String,
    /// At most three.
    #[serde(default)]
    pub attachments: Vec<AttachmentRequest>,
}

/// Payload for editing an answer.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateAnswerRequest {
    /// Blank or missing content leaves the answer unchanged.
    #[serde(default)]
    pub content: String,
}

/// Answers to a question, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/answers/question/{questionId}",
    params(("questionId" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Answers, empty for unknown questions", body = [AnswerSchema]),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "listAnswers",
    security([])
)]
#[get("/answers/question/{question_id}")]
pub async fn list_answers(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Answer>>> {
    let question: QuestionId = parse_id(&path, QUESTION_ID)?;
    let answers = state.answers_query.list_for_question(&question).await?;
    Ok(web::Json(answers))
}

/// Answer a question and collect its stake.
#[utoipa::path(
    post,
    path = "/api/v1/answers",
    request_body = CreateAnswerRequest,
    responses(
        (status = 201, description = "Answer posted", body = AnswerSchema),
        (status = 400, description = "Blank content or too many attachments", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "createAnswer",
    security(("SessionCookie" = []))
)]
#[post("/answers")]
pub async fn create_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateAnswerRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let CreateAnswerRequest {
        question_id,
        content,
        attachments,
    } = payload.into_inner();
    let question: QuestionId = parse_id(&require(question_id, QUESTION_ID)?, QUESTION_ID)?;
    let draft = AnswerDraft {
        content,
        attachments: attachments.into_iter().map(AttachmentMeta::from).collect(),
    };
    let answer = state.answers.create(&user_id, &question, draft).await?;
    Ok(HttpResponse::Created().json(answer))
}

/// Replace the content of the requester's own answer.
#[utoipa::path(
    put,
    path = "/api/v1/answers/{id}",
    params(("id" = String, Path, description = "Answer id")),
    request_body = UpdateAnswerRequest,
    responses(
        (status = 200, description = "Updated answer", body = AnswerSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "updateAnswer",
    security(("SessionCookie" = []))
)]
#[put("/answers/{id}")]
pub async fn update_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateAnswerRequest>,
) -> ApiResult<web::Json<Answer>> {
    let user_id = session.require_user_id()?;
    let id: AnswerId = parse_id(&path, ANSWER_ID)?;
    let answer = state
        .answers
        .update(&id, &user_id, payload.into_inner().content)
        .await?;
    Ok(web::Json(answer))
}

/// Delete the requester's own answer, paying the deletion penalty.
#[utoipa::path(
    delete,
    path = "/api/v1/answers/{id}",
    params(("id" = String, Path, description = "Answer id")),
    responses(
        (status = 204, description = "Answer deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "deleteAnswer",
    security(("SessionCookie" = []))
)]
#[delete("/answers/{id}")]
pub async fn delete_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id: AnswerId = parse_id(&path, ANSWER_ID)?;
    state.answers.delete(&id, &user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Toggle the requester's upvote, rewarding the author when added.
#[utoipa::path(
    post,
    path = "/api/v1/answers/{id}/upvote",
    params(("id" = String, Path, description = "Answer id")),
    responses(
        (status = 200, description = "Vote toggled", body = VoteOutcomeSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "upvoteAnswer",
    security(("SessionCookie" = []))
)]
#[post("/answers/{id}/upvote")]
pub async fn upvote_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VoteOutcome>> {
    let user_id = session.require_user_id()?;
    let id: AnswerId = parse_id(&path, ANSWER_ID)?;
    let outcome = state.answers.upvote(&id, &user_id).await?;
    Ok(web::Json(outcome))
}

/// Accept an answer to the requester's question and resolve it.
#[utoipa::path(
    post,
    path = "/api/v1/answers/{id}/accept",
    params(("id" = String, Path, description = "Answer id")),
    responses(
        (status = 200, description = "Accepted answer", body = AnswerSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the question author", body = ErrorSchema),
        (status = 404, description = "Answer not found", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "acceptAnswer",
    security(("SessionCookie" = []))
)]
#[post("/answers/{id}/accept")]
pub async fn accept_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Answer>> {
    let user_id = session.require_user_id()?;
    let id: AnswerId = parse_id(&path, ANSWER_ID)?;
    let answer = state.answers.accept(&id, &user_id).await?;
    Ok(web::Json(answer))
}

#[cfg(test)]
#[path = "answers_tests.rs"]
mod tests;
