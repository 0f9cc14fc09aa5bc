//! Domain primitives, aggregates, and the services that drive them.
//!
//! Purpose: model the question and answer lifecycle and the points economy
//! attached to it, independent of HTTP and storage. Services talk to the
//! outside world only through [`ports`].
//!
//! Public surface:
//! - Entities: [`User`], [`Question`], [`Answer`], [`Comment`],
//!   [`Notification`].
//! - Errors: [`Error`] with a stable [`ErrorCode`].
//! - Services: [`QuestionService`], [`AnswerService`], [`CommentService`],
//!   [`RankingService`], [`NotificationService`], [`AccountService`].

pub mod account_service;
pub mod answer;
pub mod answer_service;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod identifiers;
pub mod ledger;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod question;
pub mod question_service;
pub mod ranking;
mod service_support;
pub mod trace_id;
pub mod user;
pub mod votes;

pub use self::account_service::AccountService;
pub use self::answer::{
    AiVerification, Answer, AnswerDraft, AnswerValidationError, AttachmentMeta, MAX_ATTACHMENTS,
    answer_content,
};
pub use self::answer_service::AnswerService;
pub use self::comment::{
    COMMENT_MAX, Comment, CommentTarget, CommentValidationError, comment_content,
};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifiers::{AnswerId, CommentId, NotificationId, QuestionId};
pub use self::ledger::PointsLedger;
pub use self::notification::{Notification, NotificationDraft, NotificationKind};
pub use self::notification_service::{NotificationEmitter, NotificationService};
pub use self::question::{
    CONTENT_MAX, DEFAULT_GRADE, NewQuestion, Question, QuestionDraft, QuestionEdit,
    QuestionFilter, QuestionValidationError, Stake, StudyYear, TITLE_MAX,
};
pub use self::question_service::QuestionService;
pub use self::ranking::{
    DEFAULT_LEADERBOARD_LIMIT, RankingService, StandingKey, standing_key,
    standing_order,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AVATAR_SEED_MAX, AcademicYear, AvatarSeed, DEFAULT_AVATAR, EmailAddress, OnboardingDetails,
    ProfilePatch, USERNAME_MAX, USERNAME_MIN, User, UserId, UserProfile, UserValidationError,
    Username,
};
pub use self::votes::{VoteOutcome, VoteToggle, toggle_membership};
