//! PostgreSQL-backed `AnswerRepository` implementation using Diesel ORM.
//!
//! Acceptance is exclusive per question: one `UPDATE` sets `is_accepted` to
//! `id = target` across every answer of the question, and only when the
//! target belongs to that question.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Jsonb, Timestamptz, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AnswerRepository, AnswerRepositoryError};
use crate::domain::{AiVerification, Answer, AnswerId, QuestionId, UserId, VoteOutcome};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{VotableTable, toggle_upvote};
use super::models::{AnswerRow, NewAnswerRow};
use super::pool::{DbPool, PoolError};
use super::schema::answers;

const MARK_ACCEPTED_SQL: &str = "UPDATE answers \
     SET is_accepted = (id = $2), \
         updated_at = CASE WHEN id = $2 THEN $3 ELSE updated_at END \
     WHERE question_id = $1 \
       AND EXISTS (SELECT 1 FROM answers WHERE id = $2 AND question_id = $1) \
     RETURNING *";

const ADD_VERIFICATION_SQL: &str = "UPDATE answers \
     SET verifications = verifications || jsonb_build_array($2::jsonb) \
     WHERE id = $1 \
     RETURNING *";

/// Diesel-backed implementation of the answer repository port.
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AnswerRepositoryError {
    map_basic_pool_error(error, |message| AnswerRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> AnswerRepositoryError {
    map_basic_diesel_error(
        error,
        AnswerRepositoryError::query,
        AnswerRepositoryError::connection,
    )
}

fn into_answer(row: AnswerRow) -> Result<Answer, AnswerRepositoryError> {
    row.into_domain().map_err(AnswerRepositoryError::query)
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerRepositoryError> {
        let row = NewAnswerRow::new(answer).map_err(AnswerRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(answers::table)
            .values(row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = answers::table
            .filter(answers::id.eq(id.as_uuid()))
            .select(AnswerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(into_answer).transpose()
    }

    async fn list_for_question(
        &self,
        question: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AnswerRow> = answers::table
            .filter(answers::question_id.eq(question.as_uuid()))
            .order((answers::created_at.desc(), answers::id.desc()))
            .select(AnswerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(into_answer).collect()
    }

    async fn update_content(
        &self,
        id: &AnswerId,
        content: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(answers::table.filter(answers::id.eq(id.as_uuid())))
            .set((answers::content.eq(content), answers::updated_at.eq(at)))
            .returning(AnswerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(into_answer).transpose()
    }

    async fn delete(&self, id: &AnswerId) -> Result<bool, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(answers::table.filter(answers::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn toggle_upvote(
        &self,
        id: &AnswerId,
        user: &UserId,
    ) -> Result<Option<VoteOutcome>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = toggle_upvote(
            &mut conn,
            VotableTable::Answers,
            *id.as_uuid(),
            *user.as_uuid(),
        )
        .await
        .map_err(map_diesel_error)?;
        Ok(row.map(VoteOutcome::from))
    }

    async fn mark_accepted(
        &self,
        question: &QuestionId,
        answer: &AnswerId,
        at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AnswerRow> = sql_query(MARK_ACCEPTED_SQL)
            .bind::<SqlUuid, _>(*question.as_uuid())
            .bind::<SqlUuid, _>(*answer.as_uuid())
            .bind::<Timestamptz, _>(at)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .find(|row| row.id == *answer.as_uuid())
            .map(into_answer)
            .transpose()
    }

    async fn add_verification(
        &self,
        id: &AnswerId,
        verification: &AiVerification,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let record = serde_json::to_value(verification).map_err(|err| {
            AnswerRepositoryError::query(format!("serialise verification: {err}"))
        })?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AnswerRow> = sql_query(ADD_VERIFICATION_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<Jsonb, _>(record)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().next().map(into_answer).transpose()
    }
}
