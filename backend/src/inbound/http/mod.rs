//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate JSON requests into driving-port calls on [`state::HttpState`]
//! and map domain errors onto responses through [`error`].

use actix_web::web;

pub mod answers;
pub mod comments;
pub mod error;
pub mod health;
pub mod notifications;
pub mod questions;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller owns the scope prefix and the session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::current_user)
        .service(users::leaderboard)
        .service(users::current_rank)
        .service(users::complete_onboarding)
        .service(users::update_profile)
        .service(users::update_avatar_seed)
        .service(questions::list_questions)
        .service(questions::list_questions_by_email)
        .service(questions::get_question)
        .service(questions::create_question)
        .service(questions::update_question)
        .service(questions::delete_question)
        .service(questions::upvote_question)
        .service(questions::resolve_question)
        .service(questions::unresolve_question)
        .service(answers::list_answers)
        .service(answers::create_answer)
        .service(answers::update_answer)
        .service(answers::delete_answer)
        .service(answers::upvote_answer)
        .service(answers::accept_answer)
        .service(comments::list_question_comments)
        .service(comments::list_answer_comments)
        .service(comments::create_comment)
        .service(comments::update_comment)
        .service(comments::delete_comment)
        .service(comments::upvote_comment)
        .service(comments::verify_ai_answer)
        .service(notifications::list_notifications)
        .service(notifications::unread_count)
        .service(notifications::mark_all_read)
        .service(notifications::mark_read);
}
