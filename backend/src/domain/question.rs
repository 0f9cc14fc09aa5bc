//! Question aggregate, its stake, and the validated inputs that create or edit it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerId, QuestionId, UserId};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 200;
/// Maximum body length in characters.
pub const CONTENT_MAX: usize = 1000;
/// Grade recorded when the author does not supply one.
pub const DEFAULT_GRADE: &str = "Engineering";

/// Validation failures for question input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("stake must be a finite number")]
    NonFiniteStake,
    #[error("stake exceeds the largest supported value")]
    StakeTooLarge,
    #[error("year must be one of 1st Year, 2nd Year, 3rd Year, 4th Year, Masters")]
    UnknownYear,
}

impl QuestionValidationError {
    /// Field the failure refers to, for error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
            Self::NonFiniteStake | Self::StakeTooLarge => "points",
            Self::UnknownYear => "year",
        }
    }
}

/// Cohort a question is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyYear {
    #[serde(rename = "1st Year")]
    First,
    #[serde(rename = "2nd Year")]
    Second,
    #[serde(rename = "3rd Year")]
    Third,
    #[serde(rename = "4th Year")]
    Fourth,
    #[serde(rename = "Masters")]
    Masters,
}

impl StudyYear {
    /// Display label, also used as the stored value.
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "1st Year",
            Self::Second => "2nd Year",
            Self::Third => "3rd Year",
            Self::Fourth => "4th Year",
            Self::Masters => "Masters",
        }
    }
}

impl fmt::Display for StudyYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StudyYear {
    type Err = QuestionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1st Year" => Ok(Self::First),
            "2nd Year" => Ok(Self::Second),
            "3rd Year" => Ok(Self::Third),
            "4th Year" => Ok(Self::Fourth),
            "Masters" => Ok(Self::Masters),
            _ => Err(QuestionValidationError::UnknownYear),
        }
    }
}

/// Points an asker puts up for whoever answers. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stake(u32);

impl Stake {
    /// Normalise client input: absent means 1, fractions are floored, and
    /// anything below 1 is raised to 1.
    ///
    /// # Examples
    /// ```
    /// use askboard::domain::Stake;
    ///
    /// assert_eq!(Stake::normalise(None).map(Stake::get), Ok(1));
    /// assert_eq!(Stake::normalise(Some(7.9)).map(Stake::get), Ok(7));
    /// assert_eq!(Stake::normalise(Some(-4.0)).map(Stake::get), Ok(1));
    /// assert!(Stake::normalise(Some(f64::NAN)).is_err());
    /// ```
    pub fn normalise(raw: Option<f64>) -> Result<Self, QuestionValidationError> {
        let Some(value) = raw else {
            return Ok(Self(1));
        };
        if !value.is_finite() {
            return Err(QuestionValidationError::NonFiniteStake);
        }
        let floored = value.floor().max(1.0);
        if floored > f64::from(u32::MAX) {
            return Err(QuestionValidationError::StakeTooLarge);
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is floored and range-checked above"
        )]
        let points = floored as u32;
        Ok(Self(points))
    }

    /// Number of points staked.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Unvalidated question input as received from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub title: String,
    pub content: String,
    pub subject: String,
    pub branch: String,
    pub year: String,
    pub grade: Option<String>,
    pub tags: Vec<String>,
    pub stake: Option<f64>,
}

/// Question input that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub subject: String,
    pub branch: String,
    pub year: StudyYear,
    pub grade: String,
    pub tags: Vec<String>,
    pub stake: Stake,
}

impl QuestionDraft {
    /// Trim and check every field, normalising the stake.
    pub fn validate(self) -> Result<NewQuestion, QuestionValidationError> {
        Ok(NewQuestion {
            title: bounded_text("title", &self.title, Some(TITLE_MAX))?,
            content: bounded_text("content", &self.content, Some(CONTENT_MAX))?,
            subject: bounded_text("subject", &self.subject, None)?,
            branch: bounded_text("branch", &self.branch, None)?,
            year: self.year.trim().parse()?,
            grade: self
                .grade
                .map(|grade| grade.trim().to_owned())
                .filter(|grade| !grade.is_empty())
                .unwrap_or_else(|| DEFAULT_GRADE.to_owned()),
            tags: normalise_tags(self.tags),
            stake: Stake::normalise(self.stake)?,
        })
    }
}

pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    max: Option<usize>,
) -> Result<String, QuestionValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QuestionValidationError::Empty { field });
    }
    match max {
        Some(max) if trimmed.chars().count() > max => {
            Err(QuestionValidationError::TooLong { field, max })
        }
        _ => Ok(trimmed.to_owned()),
    }
}

fn normalise_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// A posted question.
///
/// ## Invariants
/// - `points` is fixed at creation and never recomputed from the author.
/// - `upvotes` holds each user at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub author: UserId,
    pub title: String,
    pub content: String,
    pub subject: String,
    pub branch: String,
    pub year: StudyYear,
    pub grade: String,
    pub tags: Vec<String>,
    pub points: u32,
    pub is_resolved: bool,
    pub views: u64,
    pub upvotes: Vec<UserId>,
    pub answers: Vec<AnswerId>,
    pub ai_answer: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Build an open question with no engagement yet.
    pub fn create(id: QuestionId, author: UserId, input: NewQuestion, now: DateTime<Utc>) -> Self {
        Self {
            id,
            author,
            title: input.title,
            content: input.content,
            subject: input.subject,
            branch: input.branch,
            year: input.year,
            grade: input.grade,
            tags: input.tags,
            points: input.stake.get(),
            is_resolved: false,
            views: 0,
            upvotes: Vec::new(),
            answers: Vec::new(),
            ai_answer: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Author edit of an existing question. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl QuestionEdit {
    /// Validate the provided fields and write them onto `question`.
    ///
    /// Blank strings count as absent. The stake cannot be edited.
    pub fn apply_to(
        self,
        question: &mut Question,
        now: DateTime<Utc>,
    ) -> Result<(), QuestionValidationError> {
        let present = |value: Option<String>| value.filter(|text| !text.trim().is_empty());
        if let Some(title) = present(self.title) {
            question.title = bounded_text("title", &title, Some(TITLE_MAX))?;
        }
        if let Some(content) = present(self.content) {
            question.content = bounded_text("content", &content, Some(CONTENT_MAX))?;
        }
        if let Some(subject) = present(self.subject) {
            question.subject = bounded_text("subject", &subject, None)?;
        }
        if let Some(grade) = present(self.grade) {
            question.grade = bounded_text("grade", &grade, None)?;
        }
        if let Some(tags) = self.tags {
            question.tags = normalise_tags(tags);
        }
        question.updated_at = now;
        Ok(())
    }
}

/// Listing filter. Subject and grade match exactly; `search` is a
/// case-insensitive substring over title and content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub author: Option<UserId>,
    pub search: Option<String>,
}

impl QuestionFilter {
    /// Whether `question` satisfies every populated criterion.
    pub fn matches(&self, question: &Question) -> bool {
        if self
            .subject
            .as_ref()
            .is_some_and(|subject| *subject != question.subject)
        {
            return false;
        }
        if self
            .grade
            .as_ref()
            .is_some_and(|grade| *grade != question.grade)
        {
            return false;
        }
        if self
            .author
            .as_ref()
            .is_some_and(|author| *author != question.author)
        {
            return false;
        }
        match self.search.as_deref() {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                question.title.to_lowercase().contains(&needle)
                    || question.content.to_lowercase().contains(&needle)
            }
        }
    }
}
