//! Comments on questions and answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerId, CommentId, QuestionId, UserId};

/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 500;

/// Validation failures for comment text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("content must not be empty")]
    Empty,
    #[error("content must be at most {max} characters")]
    TooLong { max: usize },
}

/// Trimmed comment text within the length limit.
///
/// # Examples
/// ```
/// use askboard::domain::comment_content;
///
/// assert_eq!(comment_content("  nice  ").as_deref(), Ok("nice"));
/// assert!(comment_content(&"x".repeat(501)).is_err());
/// ```
pub fn comment_content(raw: &str) -> Result<String, CommentValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CommentValidationError::Empty);
    }
    if trimmed.chars().count() > COMMENT_MAX {
        return Err(CommentValidationError::TooLong { max: COMMENT_MAX });
    }
    Ok(trimmed.to_owned())
}

/// A comment on a question, or on one of its answers when `answer` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub author: UserId,
    pub question: QuestionId,
    pub answer: Option<AnswerId>,
    pub parent_comment: Option<CommentId>,
    pub content: String,
    pub upvotes: Vec<UserId>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where a new comment is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTarget {
    pub question: QuestionId,
    pub answer: Option<AnswerId>,
    pub parent_comment: Option<CommentId>,
}

impl Comment {
    /// Build a fresh comment from already validated content.
    pub fn create(
        id: CommentId,
        author: UserId,
        target: CommentTarget,
        content: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author,
            question: target.question,
            answer: target.answer,
            parent_comment: target.parent_comment,
            content,
            upvotes: Vec::new(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}
