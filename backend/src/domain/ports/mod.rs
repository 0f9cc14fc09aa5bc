//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`AiAugmentation`]) are implemented by the
//! outbound adapters. Driving ports (`*Command`, `*Query`,
//! [`NotificationInbox`]) are implemented by the domain services and consumed
//! by the HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod ai_augmentation;
mod answer_command;
mod answer_query;
mod answer_repository;
mod comment_command;
mod comment_query;
mod comment_repository;
mod notification_inbox;
mod notification_repository;
mod question_command;
mod question_query;
mod question_repository;
mod ranking_query;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, ProfileFields, Registration};
#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use account_query::AccountQuery;
#[cfg(test)]
pub use ai_augmentation::MockAiAugmentation;
pub use ai_augmentation::{AiAugmentation, AiAugmentationError, AiPrompt, FixtureAiAugmentation};
#[cfg(test)]
pub use answer_command::MockAnswerCommand;
pub use answer_command::AnswerCommand;
#[cfg(test)]
pub use answer_query::MockAnswerQuery;
pub use answer_query::AnswerQuery;
#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{AnswerRepository, AnswerRepositoryError};
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_command::{AiVerdict, CommentCommand, NewComment};
#[cfg(test)]
pub use comment_query::MockCommentQuery;
pub use comment_query::CommentQuery;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
pub use notification_inbox::{INBOX_LIMIT, NotificationInbox};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use question_command::MockQuestionCommand;
pub use question_command::QuestionCommand;
#[cfg(test)]
pub use question_query::MockQuestionQuery;
pub use question_query::QuestionQuery;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{QuestionRepository, QuestionRepositoryError};
#[cfg(test)]
pub use ranking_query::MockRankingQuery;
pub use ranking_query::{RankingQuery, Standing};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
