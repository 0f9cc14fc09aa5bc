//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain types report
//! malformed rows as plain messages so each repository can wrap them in its
//! own query error.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool};
use uuid::Uuid;

use super::schema::{answers, comments, notifications, questions, users};
use crate::domain::{
    AcademicYear, AiVerification, Answer, AvatarSeed, AnswerId, AttachmentMeta, Comment, CommentId,
    EmailAddress, Notification, NotificationId, NotificationKind, Question, QuestionId, User,
    UserId, UserProfile, Username, VoteOutcome, VoteToggle,
};

fn user_ids(raw: Vec<Uuid>) -> Vec<UserId> {
    raw.into_iter().map(UserId::from_uuid).collect()
}

pub(crate) fn user_uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub custom_avatar_seed: Option<String>,
    pub points: i64,
    pub is_onboarded: bool,
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i16>,
    pub college_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_domain(self) -> Result<User, String> {
        let year = self
            .year
            .map(|raw| {
                u8::try_from(raw)
                    .map_err(|err| err.to_string())
                    .and_then(|year| AcademicYear::new(year).map_err(|err| err.to_string()))
            })
            .transpose()?;
        Ok(User {
            id: UserId::from_uuid(self.id),
            username: Username::new(&self.username).map_err(|err| err.to_string())?,
            email: EmailAddress::new(&self.email).map_err(|err| err.to_string())?,
            avatar: self.avatar,
            custom_avatar_seed: self
                .custom_avatar_seed
                .map(AvatarSeed::parse)
                .transpose()
                .map_err(|err| err.to_string())?
                .flatten(),
            points: self.points,
            is_onboarded: self.is_onboarded,
            profile: UserProfile {
                full_name: self.full_name,
                contact_number: self.contact_number,
                branch: self.branch,
                year,
                college_name: self.college_name,
            },
            created_at: self.created_at,
        })
    }
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub avatar: &'a str,
    pub custom_avatar_seed: Option<&'a str>,
    pub points: i64,
    pub is_onboarded: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            avatar: user.avatar.as_str(),
            custom_avatar_seed: user.custom_avatar_seed.as_ref().map(AsRef::as_ref),
            points: user.points,
            is_onboarded: user.is_onboarded,
            created_at: user.created_at,
        }
    }
}

/// Changeset for profile writes. `None` fields are written as NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileUpdate<'a> {
    pub full_name: Option<&'a str>,
    pub contact_number: Option<&'a str>,
    pub branch: Option<&'a str>,
    pub year: Option<i16>,
    pub college_name: Option<&'a str>,
    pub is_onboarded: bool,
}

impl<'a> ProfileUpdate<'a> {
    pub fn new(profile: &'a UserProfile, is_onboarded: bool) -> Self {
        Self {
            full_name: profile.full_name.as_deref(),
            contact_number: profile.contact_number.as_deref(),
            branch: profile.branch.as_deref(),
            year: profile.year.map(|year| i16::from(year.get())),
            college_name: profile.college_name.as_deref(),
            is_onboarded,
        }
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// Row struct for reading from the questions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub subject: String,
    pub branch: String,
    pub year: String,
    pub grade: String,
    pub tags: Vec<String>,
    pub points: i32,
    pub is_resolved: bool,
    pub views: i64,
    pub upvotes: Vec<Uuid>,
    pub answer_ids: Vec<Uuid>,
    pub ai_answer: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionRow {
    pub fn into_domain(self) -> Result<Question, String> {
        Ok(Question {
            id: QuestionId::from_uuid(self.id),
            author: UserId::from_uuid(self.author_id),
            title: self.title,
            content: self.content,
            subject: self.subject,
            branch: self.branch,
            year: self.year.parse().map_err(|_| format!("unknown year {}", self.year))?,
            grade: self.grade,
            tags: self.tags,
            points: u32::try_from(self.points).map_err(|err| format!("stake: {err}"))?,
            is_resolved: self.is_resolved,
            views: u64::try_from(self.views).map_err(|err| format!("views: {err}"))?,
            upvotes: user_ids(self.upvotes),
            answers: self.answer_ids.into_iter().map(AnswerId::from_uuid).collect(),
            ai_answer: self.ai_answer,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable struct for new questions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub(crate) struct NewQuestionRow<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub subject: &'a str,
    pub branch: &'a str,
    pub year: &'static str,
    pub grade: &'a str,
    pub tags: &'a [String],
    pub points: i32,
    pub is_resolved: bool,
    pub ai_answer: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewQuestionRow<'a> {
    pub fn new(question: &'a Question) -> Result<Self, String> {
        Ok(Self {
            id: *question.id.as_uuid(),
            author_id: *question.author.as_uuid(),
            title: &question.title,
            content: &question.content,
            subject: &question.subject,
            branch: &question.branch,
            year: question.year.label(),
            grade: &question.grade,
            tags: &question.tags,
            points: i32::try_from(question.points).map_err(|err| format!("stake: {err}"))?,
            is_resolved: question.is_resolved,
            ai_answer: question.ai_answer.as_deref(),
            created_at: question.created_at,
            updated_at: question.updated_at,
        })
    }
}

/// Changeset for author edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = questions)]
pub(crate) struct QuestionContentUpdate<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub subject: &'a str,
    pub grade: &'a str,
    pub tags: &'a [String],
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Question> for QuestionContentUpdate<'a> {
    fn from(question: &'a Question) -> Self {
        Self {
            title: &question.title,
            content: &question.content,
            subject: &question.subject,
            grade: &question.grade,
            tags: &question.tags,
            updated_at: question.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// Row struct for reading from the answers table.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub attachments: serde_json::Value,
    pub is_ai: bool,
    pub is_accepted: bool,
    pub upvotes: Vec<Uuid>,
    pub verifications: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AnswerRow {
    pub fn into_domain(self) -> Result<Answer, String> {
        let attachments: Vec<AttachmentMeta> = serde_json::from_value(self.attachments)
            .map_err(|err| format!("decode attachments: {err}"))?;
        let verifications: Vec<AiVerification> = serde_json::from_value(self.verifications)
            .map_err(|err| format!("decode verifications: {err}"))?;
        Ok(Answer {
            id: AnswerId::from_uuid(self.id),
            author: UserId::from_uuid(self.author_id),
            question: QuestionId::from_uuid(self.question_id),
            content: self.content,
            attachments,
            is_ai: self.is_ai,
            is_accepted: self.is_accepted,
            upvotes: user_ids(self.upvotes),
            verifications,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable struct for new answers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub(crate) struct NewAnswerRow<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub question_id: Uuid,
    pub content: &'a str,
    pub attachments: serde_json::Value,
    pub is_ai: bool,
    pub is_accepted: bool,
    pub upvotes: Vec<Uuid>,
    pub verifications: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewAnswerRow<'a> {
    pub fn new(answer: &'a Answer) -> Result<Self, String> {
        Ok(Self {
            id: *answer.id.as_uuid(),
            author_id: *answer.author.as_uuid(),
            question_id: *answer.question.as_uuid(),
            content: &answer.content,
            attachments: serde_json::to_value(&answer.attachments)
                .map_err(|err| format!("serialise attachments: {err}"))?,
            is_ai: answer.is_ai,
            is_accepted: answer.is_accepted,
            upvotes: user_uuids(&answer.upvotes),
            verifications: serde_json::to_value(&answer.verifications)
                .map_err(|err| format!("serialise verifications: {err}"))?,
            created_at: answer.created_at,
            updated_at: answer.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub question_id: Uuid,
    pub answer_id: Option<Uuid>,
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
    pub upvotes: Vec<Uuid>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::from_uuid(row.id),
            author: UserId::from_uuid(row.author_id),
            question: QuestionId::from_uuid(row.question_id),
            answer: row.answer_id.map(AnswerId::from_uuid),
            parent_comment: row.parent_comment_id.map(CommentId::from_uuid),
            content: row.content,
            upvotes: user_ids(row.upvotes),
            is_verified: row.is_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for new comments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub question_id: Uuid,
    pub answer_id: Option<Uuid>,
    pub parent_comment_id: Option<Uuid>,
    pub content: &'a str,
    pub upvotes: Vec<Uuid>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Comment> for NewCommentRow<'a> {
    fn from(comment: &'a Comment) -> Self {
        Self {
            id: *comment.id.as_uuid(),
            author_id: *comment.author.as_uuid(),
            question_id: *comment.question.as_uuid(),
            answer_id: comment.answer.map(|id| *id.as_uuid()),
            parent_comment_id: comment.parent_comment.map(|id| *id.as_uuid()),
            content: &comment.content,
            upvotes: user_uuids(&comment.upvotes),
            is_verified: comment.is_verified,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Row struct for reading from the notifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Uuid,
    pub kind: String,
    pub message: String,
    pub question_id: Uuid,
    pub answer_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationRow {
    pub fn into_domain(self) -> Result<Notification, String> {
        let kind = NotificationKind::parse(&self.kind)
            .ok_or_else(|| format!("unknown notification kind {}", self.kind))?;
        Ok(Notification {
            id: NotificationId::from_uuid(self.id),
            recipient: UserId::from_uuid(self.recipient_id),
            sender: UserId::from_uuid(self.sender_id),
            kind,
            message: self.message,
            question: QuestionId::from_uuid(self.question_id),
            answer: self.answer_id.map(AnswerId::from_uuid),
            comment: self.comment_id.map(CommentId::from_uuid),
            is_read: self.is_read,
            created_at: self.created_at,
        })
    }
}

/// Insertable struct for new notifications.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Uuid,
    pub kind: &'static str,
    pub message: &'a str,
    pub question_id: Uuid,
    pub answer_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Notification> for NewNotificationRow<'a> {
    fn from(notification: &'a Notification) -> Self {
        Self {
            id: *notification.id.as_uuid(),
            recipient_id: *notification.recipient.as_uuid(),
            sender_id: *notification.sender.as_uuid(),
            kind: notification.kind.as_str(),
            message: &notification.message,
            question_id: *notification.question.as_uuid(),
            answer_id: notification.answer.map(|id| *id.as_uuid()),
            comment_id: notification.comment.map(|id| *id.as_uuid()),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

/// Result row of an upvote toggle statement.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct VoteToggleRow {
    #[diesel(sql_type = Bool)]
    pub added: bool,
    #[diesel(sql_type = BigInt)]
    pub upvote_count: i64,
}

impl From<VoteToggleRow> for VoteOutcome {
    fn from(row: VoteToggleRow) -> Self {
        Self {
            toggle: if row.added {
                VoteToggle::Added
            } else {
                VoteToggle::Removed
            },
            upvotes: u64::try_from(row.upvote_count).unwrap_or_default(),
        }
    }
}
