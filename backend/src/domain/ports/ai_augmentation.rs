//! Driven port for drafting a supplementary answer with a language model.
//!
//! Callers treat every failure as non-fatal: a question is created whether or
//! not a draft comes back.

use async_trait::async_trait;

use crate::domain::{Question, StudyYear};

use super::define_port_error;

define_port_error! {
    /// Failures reported by AI augmentation adapters.
    pub enum AiAugmentationError {
        /// The request never reached the provider.
        Transport { message: String } => "AI request failed: {message}",
        /// The provider did not answer within the configured timeout.
        Timeout { message: String } => "AI request timed out: {message}",
        /// The provider answered with a non-success status.
        Upstream { status: u16, message: String } => "AI provider returned {status}: {message}",
        /// The response body did not contain a usable answer.
        Decode { message: String } => "AI response could not be decoded: {message}",
    }
}

/// The question fields sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiPrompt {
    pub title: String,
    pub content: String,
    pub subject: String,
    pub branch: String,
    pub year: StudyYear,
}

impl AiPrompt {
    /// Instruction given to the model as its system role.
    pub const SYSTEM: &'static str = "You are a helpful engineering education assistant. \
        Provide accurate, concise answers suitable for engineering students.";

    /// Capture the prompt fields of a stored question.
    pub fn for_question(question: &Question) -> Self {
        Self {
            title: question.title.clone(),
            content: question.content.clone(),
            subject: question.subject.clone(),
            branch: question.branch.clone(),
            year: question.year,
        }
    }

    /// The user message sent to the model.
    ///
    /// # Examples
    /// ```
    /// use askboard::domain::StudyYear;
    /// use askboard::domain::ports::AiPrompt;
    ///
    /// let prompt = AiPrompt {
    ///     title: "Ohm".into(),
    ///     content: "What is V?".into(),
    ///     subject: "Physics".into(),
    ///     branch: "EE".into(),
    ///     year: StudyYear::First,
    /// };
    /// assert!(prompt.render().contains("Year: 1st Year"));
    /// ```
    pub fn render(&self) -> String {
        format!(
            "Generate a concise, helpful answer for this engineering student question:\n\n\
             Title: {}\nQuestion: {}\nSubject: {}\nBranch: {}\nYear: {}\n\n\
             Provide a clear, accurate answer that is appropriate for an engineering \
             student. Keep it concise but informative.",
            self.title, self.content, self.subject, self.branch, self.year
        )
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiAugmentation: Send + Sync {
    /// Draft an answer for the prompt.
    async fn generate(&self, prompt: &AiPrompt) -> Result<String, AiAugmentationError>;
}

/// Fixture that answers every prompt with the same text.
#[derive(Debug, Clone)]
pub struct FixtureAiAugmentation {
    pub reply: String,
}

impl Default for FixtureAiAugmentation {
    fn default() -> Self {
        Self {
            reply: "Start from the definitions and work one step at a time.".to_owned(),
        }
    }
}

#[async_trait]
impl AiAugmentation for FixtureAiAugmentation {
    async fn generate(&self, _prompt: &AiPrompt) -> Result<String, AiAugmentationError> {
        Ok(self.reply.clone())
    }
}
