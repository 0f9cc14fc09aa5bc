//! Helpers shared by the domain services: port error mapping, validation
//! error shaping, and author checks.

use serde_json::json;

use crate::domain::ports::{
    AnswerRepositoryError, CommentRepositoryError, NotificationRepositoryError,
    QuestionRepositoryError, UserPersistenceError,
};
use crate::domain::{
    AnswerValidationError, CommentValidationError, Error, QuestionValidationError, UserId,
    UserValidationError,
};

/// An `invalid_request` error naming the offending field.
pub(crate) fn invalid_field(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// Fail with `forbidden` unless `requester` owns the resource.
pub(crate) fn ensure_owner(owner: &UserId, requester: &UserId, action: &str) -> Result<(), Error> {
    if owner == requester {
        Ok(())
    } else {
        Err(Error::forbidden(format!("not authorized to {action}")))
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(format!("a user with this {field} already exists"))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
    }
}

pub(crate) fn map_question_error(error: QuestionRepositoryError) -> Error {
    match error {
        QuestionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionRepositoryError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
    }
}

pub(crate) fn map_answer_error(error: AnswerRepositoryError) -> Error {
    match error {
        AnswerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("answer repository unavailable: {message}"))
        }
        AnswerRepositoryError::Query { message } => {
            Error::internal(format!("answer repository error: {message}"))
        }
    }
}

pub(crate) fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

pub(crate) fn map_notification_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

pub(crate) fn question_validation(error: QuestionValidationError) -> Error {
    let code = match &error {
        QuestionValidationError::Empty { .. } => "required",
        QuestionValidationError::TooLong { .. } => "too_long",
        QuestionValidationError::NonFiniteStake | QuestionValidationError::StakeTooLarge => {
            "invalid_stake"
        }
        QuestionValidationError::UnknownYear => "unknown_year",
    };
    invalid_field(error.field(), code, error.to_string())
}

pub(crate) fn answer_validation(error: AnswerValidationError) -> Error {
    let code = match &error {
        AnswerValidationError::EmptyContent => "required",
        AnswerValidationError::TooManyAttachments { .. } => "too_many",
    };
    invalid_field(error.field(), code, error.to_string())
}

pub(crate) fn comment_validation(error: CommentValidationError) -> Error {
    let code = match &error {
        CommentValidationError::Empty => "required",
        CommentValidationError::TooLong { .. } => "too_long",
    };
    invalid_field("content", code, error.to_string())
}

pub(crate) fn user_validation(error: UserValidationError) -> Error {
    let (field, code) = match &error {
        UserValidationError::EmptyId | UserValidationError::InvalidId => ("id", "invalid_id"),
        UserValidationError::UsernameTooShort { .. } => ("username", "too_short"),
        UserValidationError::UsernameTooLong { .. } => ("username", "too_long"),
        UserValidationError::InvalidEmail => ("email", "invalid_email"),
        UserValidationError::YearOutOfRange { .. } => ("year", "out_of_range"),
        UserValidationError::MissingProfileField { field } => (*field, "required"),
        UserValidationError::AvatarSeedTooLong { .. } => ("customAvatarSeed", "too_long"),
        UserValidationError::EmptyAvatarSeed => ("customAvatarSeed", "required"),
    };
    invalid_field(field, code, error.to_string())
}
