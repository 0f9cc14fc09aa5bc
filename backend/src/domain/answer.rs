//! Answer entity, attachment metadata, and AI verification records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerId, QuestionId, UserId};

/// Maximum number of attachments on one answer.
pub const MAX_ATTACHMENTS: usize = 3;

/// Validation failures for answer input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerValidationError {
    #[error("content must not be empty")]
    EmptyContent,
    #[error("at most {max} attachments are allowed")]
    TooManyAttachments { max: usize },
}

impl AnswerValidationError {
    /// Field the failure refers to, for error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyContent => "content",
            Self::TooManyAttachments { .. } => "attachments",
        }
    }
}

/// Metadata for an uploaded file. The bytes live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMeta {
    pub filename: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: u64,
    pub path: String,
}

/// A reader's judgement on an AI-authored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiVerification {
    pub user: UserId,
    pub is_correct: bool,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated answer input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerDraft {
    pub content: String,
    pub attachments: Vec<AttachmentMeta>,
}

impl AnswerDraft {
    /// Trim the content and check the attachment count.
    pub fn validate(self) -> Result<Self, AnswerValidationError> {
        let content = answer_content(&self.content)?;
        if self.attachments.len() > MAX_ATTACHMENTS {
            return Err(AnswerValidationError::TooManyAttachments {
                max: MAX_ATTACHMENTS,
            });
        }
        Ok(Self {
            content,
            attachments: self.attachments,
        })
    }
}

/// Trimmed, non-empty answer body.
pub fn answer_content(raw: &str) -> Result<String, AnswerValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnswerValidationError::EmptyContent);
    }
    Ok(trimmed.to_owned())
}

/// An answer to a question.
///
/// ## Invariants
/// - At most one answer per question has `is_accepted` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: AnswerId,
    pub author: UserId,
    pub question: QuestionId,
    pub content: String,
    pub attachments: Vec<AttachmentMeta>,
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    pub is_accepted: bool,
    pub upvotes: Vec<UserId>,
    pub verifications: Vec<AiVerification>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Answer {
    /// A human-written answer, not yet accepted or upvoted.
    pub fn create(
        id: AnswerId,
        author: UserId,
        question: QuestionId,
        draft: AnswerDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author,
            question,
            content: draft.content,
            attachments: draft.attachments,
            is_ai: false,
            is_accepted: false,
            upvotes: Vec::new(),
            verifications: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
