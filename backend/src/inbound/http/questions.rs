//! Question HTTP handlers.
//!
//! ```text
//! GET    /api/v1/questions?page&limit&subject&grade&author&search
//! GET    /api/v1/questions/by-email/{email}
//! GET    /api/v1/questions/{id}
//! POST   /api/v1/questions
//! PUT    /api/v1/questions/{id}
//! DELETE /api/v1/questions/{id}
//! POST   /api/v1/questions/{id}/upvote
//! POST   /api/v1/questions/{id}/resolve
//! POST   /api/v1/questions/{id}/unresolve
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageParams, PaginationError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, Question, QuestionDraft, QuestionEdit, QuestionFilter, QuestionId, UserId, VoteOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, QuestionPageSchema, QuestionSchema, VoteOutcomeSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_optional_id};

const QUESTION_ID: FieldName = FieldName::new("id");

/// Listing envelope; clients read the page from `questions`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_pages: u64,
    pub current_page: u32,
    pub total: u64,
}

impl From<Page<Question>> for QuestionPage {
    fn from(page: Page<Question>) -> Self {
        Self {
            questions: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total: page.total,
        }
    }
}

/// Payload for posting a question.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[schema(example = "How do I invert a binary tree?")]
    pub title: String,
    pub content: String,
    #[schema(example = "Data Structures")]
    pub subject: String,
    #[schema(example = "CSE")]
    pub branch: String,
    #[schema(example = "2nd Year")]
    pub year: String,
    pub grade: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Stake offered to each answerer. Floored, at least 1, default 1.
    #[schema(example = 5)]
    pub points: Option<f64>,
}

impl From<CreateQuestionRequest> for QuestionDraft {
    fn from(value: CreateQuestionRequest) -> Self {
        Self {
            title: value.title,
            content: value.content,
            subject: value.subject,
            branch: value.branch,
            year: value.year,
            grade: value.grade,
            tags: value.tags,
            stake: value.points,
        }
    }
}

/// Payload for editing a question. Absent or blank fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateQuestionRequest> for QuestionEdit {
    fn from(value: UpdateQuestionRequest) -> Self {
        Self {
            title: value.title,
            content: value.content,
            subject: value.subject,
            grade: value.grade,
            tags: value.tags,
        }
    }
}

/// Query string for the question listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuestionsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub author: Option<String>,
    pub search: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn map_pagination_error(error: PaginationError) -> Error {
    let field = match error {
        PaginationError::PageOutOfRange => "page",
        PaginationError::LimitOutOfRange { .. } => "limit",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "out_of_range",
    }))
}

fn parse_list_query(query: ListQuestionsQuery) -> Result<(QuestionFilter, PageParams), Error> {
    let page = PageParams::new(query.page, query.limit).map_err(map_pagination_error)?;
    let author = non_blank(query.author);
    let filter = QuestionFilter {
        subject: non_blank(query.subject),
        grade: non_blank(query.grade),
        author: parse_optional_id::<UserId>(author.as_deref(), FieldName::new("author"))?,
        search: non_blank(query.search),
    };
    Ok((filter, page))
}

/// Filtered question listing, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, max 100"),
        ("subject" = Option<String>, Query, description = "Exact subject match"),
        ("grade" = Option<String>, Query, description = "Exact grade match"),
        ("author" = Option<String>, Query, description = "Author user id"),
        ("search" = Option<String>, Query, description = "Case-insensitive text in title or content")
    ),
    responses(
        (status = 200, description = "Page of questions", body = QuestionPageSchema),
        (status = 400, description = "Invalid page or filter", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestions",
    security([])
)]
#[get("/questions")]
pub async fn list_questions(
    state: web::Data<HttpState>,
    query: web::Query<ListQuestionsQuery>,
) -> ApiResult<web::Json<QuestionPage>> {
    let (filter, page) = parse_list_query(query.into_inner())?;
    let page = state.questions_query.list(filter, page).await?;
    Ok(web::Json(QuestionPage::from(page)))
}

/// Every question by the user with this email.
#[utoipa::path(
    get,
    path = "/api/v1/questions/by-email/{email}",
    params(("email" = String, Path, description = "Author email address")),
    responses(
        (status = 200, description = "Questions by the author, empty for unknown emails", body = [QuestionSchema])
    ),
    tags = ["questions"],
    operation_id = "listQuestionsByEmail",
    security([])
)]
#[get("/questions/by-email/{email}")]
pub async fn list_questions_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Question>>> {
    let questions = state
        .questions_query
        .list_by_author_email(&path.into_inner())
        .await?;
    Ok(web::Json(questions))
}

/// Fetch a question, counting the view.
#[utoipa::path(
    get,
    path = "/api/v1/questions/{id}",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question", body = QuestionSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "getQuestion",
    security([])
)]
#[get("/questions/{id}")]
pub async fn get_question(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Question>> {
    let id: QuestionId = parse_id(&path, QUESTION_ID)?;
    let question = state.questions_query.view(&id).await?;
    Ok(web::Json(question))
}

/// Post a question, paying the stake up front.
#[utoipa::path(
    post,
    path = "/api/v1/questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question posted", body = QuestionSchema),
        (status = 400, description = "Invalid question or insufficient points", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "createQuestion",
    security(("SessionCookie" = []))
)]
#[post("/questions")]
pub async fn create_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateQuestionRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let question = state
        .questions
        .create(&user_id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

/// Edit the requester's own question.
#[utoipa::path(
    put,
    path = "/api/v1/questions/{id}",
    params(("id" = String, Path, description = "Question id")),
    request_body = UpdateQuestionRequest,
    responses(
        (status = 200, description = "Updated question", body = QuestionSchema),
        (status = 400, description = "Invalid edit", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "updateQuestion",
    security(("SessionCookie" = []))
)]
#[put("/questions/{id}")]
pub async fn update_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateQuestionRequest>,
) -> ApiResult<web::Json<Question>> {
    let user_id = session.require_user_id()?;
    let id: QuestionId = parse_id(&path, QUESTION_ID)?;
    let question = state
        .questions
        .update(&id, &user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(question))
}

/// Delete the requester's own question and its answers.
#[utoipa::path(
    delete,
    path = "/api/v1/questions/{id}",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "deleteQuestion",
    security(("SessionCookie" = []))
)]
#[delete("/questions/{id}")]
pub async fn delete_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id: QuestionId = parse_id(&path, QUESTION_ID)?;
    state.questions.delete(&id, &user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Toggle the requester's upvote.
#[utoipa::path(
    post,
    path = "/api/v1/questions/{id}/upvote",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Vote toggled", body = VoteOutcomeSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "upvoteQuestion",
    security(("SessionCookie" = []))
)]
#[post("/questions/{id}/upvote")]
pub async fn upvote_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<VoteOutcome>> {
    let user_id = session.require_user_id()?;
    let id: QuestionId = parse_id(&path, QUESTION_ID)?;
    let outcome = state.questions.upvote(&id, &user_id).await?;
    Ok(web::Json(outcome))
}

/// Mark the requester's own question resolved.
#[utoipa::path(
    post,
    path = "/api/v1/questions/{id}/resolve",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Resolved question", body = QuestionSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "resolveQuestion",
    security(("SessionCookie" = []))
)]
#[post("/questions/{id}/resolve")]
pub async fn resolve_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Question>> {
    let user_id = session.require_user_id()?;
    let id: QuestionId = parse_id(&path, QUESTION_ID)?;
    let question = state.questions.resolve(&id, &user_id).await?;
    Ok(web::Json(question))
}

/// Reopen the requester's own question.
#[utoipa::path(
    post,
    path = "/api/v1/questions/{id}/unresolve",
    params(("id" = String, Path, description = "Question id")),
    responses(
        (status = 200, description = "Reopened question", body = QuestionSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Question not found", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "unresolveQuestion",
    security(("SessionCookie" = []))
)]
#[post("/questions/{id}/unresolve")]
pub async fn unresolve_question(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Question>> {
    let user_id = session.require_user_id()?;
    let id: QuestionId = parse_id(&path, QUESTION_ID)?;
    let question = state.questions.unresolve(&id, &user_id).await?;
    Ok(web::Json(question))
}

#[cfg(test)]
#[path = "questions_tests.rs"]
mod tests;
