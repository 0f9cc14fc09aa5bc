//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that describe
//!   domain types without coupling them to utoipa, plus the request DTOs
//! - **Security**: session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::answers::{AttachmentRequest, CreateAnswerRequest, UpdateAnswerRequest};
use crate::inbound::http::comments::{CreateCommentRequest, UpdateCommentRequest, VerifyAiRequest};
use crate::inbound::http::notifications::{MarkAllReadResponse, UnreadCountResponse};
use crate::inbound::http::questions::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::inbound::http::schemas::{
    AiVerificationSchema, AnswerSchema, AttachmentSchema, CommentSchema, ErrorCodeSchema,
    ErrorSchema, NotificationKindSchema, NotificationSchema, QuestionPageSchema, QuestionSchema,
    StandingSchema, UserProfileSchema, UserSchema, VoteOutcomeSchema, VoteToggleSchema,
};
use crate::inbound::http::users::{AvatarSeedRequest, ProfileRequest, RegisterRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/users/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Askboard backend API",
        description = "Student question and answer board with a points economy."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::leaderboard,
        crate::inbound::http::users::current_rank,
        crate::inbound::http::users::complete_onboarding,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::update_avatar_seed,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::list_questions_by_email,
        crate::inbound::http::questions::get_question,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::update_question,
        crate::inbound::http::questions::delete_question,
        crate::inbound::http::questions::upvote_question,
        crate::inbound::http::questions::resolve_question,
        crate::inbound::http::questions::unresolve_question,
        crate::inbound::http::answers::list_answers,
        crate::inbound::http::answers::create_answer,
        crate::inbound::http::answers::update_answer,
        crate::inbound::http::answers::delete_answer,
        crate::inbound::http::answers::upvote_answer,
        crate::inbound::http::answers::accept_answer,
        crate::inbound::http::comments::list_question_comments,
        crate::inbound::http::comments::list_answer_comments,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::comments::upvote_comment,
        crate::inbound::http::comments::verify_ai_answer,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::unread_count,
        crate::inbound::http::notifications::mark_all_read,
        crate::inbound::http::notifications::mark_read,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        UserProfileSchema,
        StandingSchema,
        QuestionSchema,
        QuestionPageSchema,
        AnswerSchema,
        AttachmentSchema,
        AiVerificationSchema,
        CommentSchema,
        NotificationSchema,
        NotificationKindSchema,
        VoteOutcomeSchema,
        VoteToggleSchema,
        RegisterRequest,
        ProfileRequest,
        AvatarSeedRequest,
        CreateQuestionRequest,
        UpdateQuestionRequest,
        CreateAnswerRequest,
        UpdateAnswerRequest,
        AttachmentRequest,
        CreateCommentRequest,
        UpdateCommentRequest,
        VerifyAiRequest,
        UnreadCountResponse,
        MarkAllReadResponse,
    )),
    tags(
        (name = "users", description = "Registration, profiles, and standings"),
        (name = "questions", description = "Asking, browsing, and resolving questions"),
        (name = "answers", description = "Answers and the rewards attached to them"),
        (name = "comments", description = "Discussion threads and AI answer verification"),
        (name = "notifications", description = "Per-user activity inbox"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
