//! Persisted notifications raised by question and answer activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerId, CommentId, NotificationId, QuestionId, UserId};

/// Event that produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Answer,
    Comment,
    Verification,
    Upvote,
    Accept,
}

impl NotificationKind {
    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Answer => "answer",
            Self::Comment => "comment",
            Self::Verification => "verification",
            Self::Upvote => "upvote",
            Self::Accept => "accept",
        }
    }

    /// Parse the stored string form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "answer" => Some(Self::Answer),
            "comment" => Some(Self::Comment),
            "verification" => Some(Self::Verification),
            "upvote" => Some(Self::Upvote),
            "accept" => Some(Self::Accept),
            _ => None,
        }
    }
}

/// Content of a notification before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub recipient: UserId,
    pub sender: UserId,
    pub kind: NotificationKind,
    pub message: String,
    pub question: QuestionId,
    pub answer: Option<AnswerId>,
    pub comment: Option<CommentId>,
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: UserId,
    pub sender: UserId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub question: QuestionId,
    pub answer: Option<AnswerId>,
    pub comment: Option<CommentId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Materialise an unread notification.
    pub fn from_draft(id: NotificationId, draft: NotificationDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            recipient: draft.recipient,
            sender: draft.sender,
            kind: draft.kind,
            message: draft.message,
            question: draft.question,
            answer: draft.answer,
            comment: draft.comment,
            is_read: false,
            created_at: now,
        }
    }
}
