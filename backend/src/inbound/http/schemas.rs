//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their wire shape and register under the domain name
//! through `#[schema(as = ...)]`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No signed-in session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Signed in but not the owner of the target.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Username or email already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// Balance below the requested stake.
    #[schema(rename = "insufficient_points")]
    InsufficientPoints,
    /// Operation not valid for the target, such as verifying a human answer.
    #[schema(rename = "invalid_operation")]
    InvalidOperation,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "insufficient_points")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "insufficient points")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "6f1c1f8e-0b9e-4e7e-8f2a-1d2c3b4a5e6f")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"required": 40, "available": 25}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UserProfile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserProfile, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserProfileSchema {
    full_name: Option<String>,
    contact_number: Option<String>,
    branch: Option<String>,
    /// Academic year, 1 to 4.
    #[schema(minimum = 1, maximum = 4)]
    year: Option<u8>,
    college_name: Option<String>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "ada")]
    username: String,
    #[schema(example = "ada@example.com")]
    email: String,
    avatar: String,
    /// Seed for a generated avatar, null when unset.
    custom_avatar_seed: Option<String>,
    /// Current balance. May be negative after penalties.
    #[schema(example = 50)]
    points: i64,
    is_onboarded: bool,
    profile: UserProfileSchema,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::ports::Standing`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::Standing, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct StandingSchema {
    /// One-based position in the standing order.
    #[schema(example = 1)]
    rank: u64,
    id: String,
    username: String,
    avatar: String,
    custom_avatar_seed: Option<String>,
    points: i64,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Question`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Question, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct QuestionSchema {
    id: String,
    author: String,
    title: String,
    content: String,
    subject: String,
    branch: String,
    #[schema(example = "2nd Year")]
    year: String,
    #[schema(example = "Engineering")]
    grade: String,
    tags: Vec<String>,
    /// Stake paid by the author and transferred to each answerer.
    #[schema(example = 5)]
    points: u32,
    is_resolved: bool,
    views: u64,
    upvotes: Vec<String>,
    answers: Vec<String>,
    ai_answer: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// A page of questions.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct QuestionPageSchema {
    questions: Vec<QuestionSchema>,
    total_pages: u64,
    current_page: u32,
    total: u64,
}

/// OpenAPI schema for [`crate::domain::AttachmentMeta`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AttachmentMeta, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct AttachmentSchema {
    filename: String,
    original_name: String,
    mimetype: String,
    size: u64,
    path: String,
}

/// OpenAPI schema for [`crate::domain::AiVerification`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AiVerification, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct AiVerificationSchema {
    user: String,
    is_correct: bool,
    feedback: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Answer`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Answer, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct AnswerSchema {
    id: String,
    author: String,
    question: String,
    content: String,
    /// At most three.
    attachments: Vec<AttachmentSchema>,
    #[schema(rename = "isAI")]
    is_ai: bool,
    is_accepted: bool,
    upvotes: Vec<String>,
    verifications: Vec<AiVerificationSchema>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Comment`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Comment, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CommentSchema {
    id: String,
    author: String,
    question: String,
    answer: Option<String>,
    parent_comment: Option<String>,
    content: String,
    upvotes: Vec<String>,
    is_verified: bool,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::NotificationKind`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NotificationKind)]
pub enum NotificationKindSchema {
    #[schema(rename = "answer")]
    Answer,
    #[schema(rename = "comment")]
    Comment,
    #[schema(rename = "verification")]
    Verification,
    #[schema(rename = "upvote")]
    Upvote,
    #[schema(rename = "accept")]
    Accept,
}

/// OpenAPI schema for [`crate::domain::Notification`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Notification, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct NotificationSchema {
    id: String,
    recipient: String,
    sender: String,
    #[schema(rename = "type")]
    kind: NotificationKindSchema,
    message: String,
    question: String,
    answer: Option<String>,
    comment: Option<String>,
    is_read: bool,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::VoteToggle`].
#[derive(ToSchema)]
#[schema(as = crate::domain::VoteToggle)]
pub enum VoteToggleSchema {
    #[schema(rename = "added")]
    Added,
    #[schema(rename = "removed")]
    Removed,
}

/// OpenAPI schema for [`crate::domain::VoteOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::VoteOutcome)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct VoteOutcomeSchema {
    toggle: VoteToggleSchema,
    /// Upvote count after the toggle.
    upvotes: u64,
}
