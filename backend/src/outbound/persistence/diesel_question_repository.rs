//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Uuid as SqlUuid;
use diesel_async::RunQueryDsl;
use pagination::PageParams;

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{AnswerId, Question, QuestionFilter, QuestionId, UserId, VoteOutcome};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{VotableTable, like_pattern, toggle_upvote};
use super::models::{NewQuestionRow, QuestionContentUpdate, QuestionRow};
use super::pool::{DbPool, PoolError};
use super::schema::questions;

const APPEND_ANSWER_SQL: &str =
    "UPDATE questions SET answer_ids = array_append(answer_ids, $2) WHERE id = $1";
const REMOVE_ANSWER_SQL: &str =
    "UPDATE questions SET answer_ids = array_remove(answer_ids, $2) WHERE id = $1";

/// Diesel-backed implementation of the question repository port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuestionRepositoryError {
    map_basic_pool_error(error, |message| QuestionRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> QuestionRepositoryError {
    map_basic_diesel_error(
        error,
        QuestionRepositoryError::query,
        QuestionRepositoryError::connection,
    )
}

fn into_question(row: QuestionRow) -> Result<Question, QuestionRepositoryError> {
    row.into_domain().map_err(QuestionRepositoryError::query)
}

fn into_questions(rows: Vec<QuestionRow>) -> Result<Vec<Question>, QuestionRepositoryError> {
    rows.into_iter().map(into_question).collect()
}

/// Boxed filter over the questions table for one listing criterion set.
fn filtered(filter: &QuestionFilter) -> questions::BoxedQuery<'static, Pg> {
    let mut query = questions::table.into_boxed();
    if let Some(subject) = filter.subject.clone() {
        query = query.filter(questions::subject.eq(subject));
    }
    if let Some(grade) = filter.grade.clone() {
        query = query.filter(questions::grade.eq(grade));
    }
    if let Some(author) = filter.author.as_ref() {
        query = query.filter(questions::author_id.eq(*author.as_uuid()));
    }
    if let Some(search) = filter.search.as_deref() {
        let pattern = like_pattern(search);
        query = query.filter(
            questions::title
                .ilike(pattern.clone())
                .or(questions::content.ilike(pattern)),
        );
    }
    query
}

impl DieselQuestionRepository {
    async fn edit_answer_ids(
        &self,
        statement: &'static str,
        id: &QuestionId,
        answer: &AnswerId,
    ) -> Result<(), QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        sql_query(statement)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*answer.as_uuid())
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn insert(&self, question: &Question) -> Result<(), QuestionRepositoryError> {
        let row = NewQuestionRow::new(question).map_err(QuestionRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(questions::table)
            .values(row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = questions::table
            .filter(questions::id.eq(id.as_uuid()))
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(into_question).transpose()
    }

    async fn increment_views(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(questions::table.filter(questions::id.eq(id.as_uuid())))
            .set(questions::views.eq(questions::views + 1_i64))
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(into_question).transpose()
    }

    async fn set_ai_answer(
        &self,
        id: &QuestionId,
        ai_answer: &str,
    ) -> Result<(), QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(questions::table.filter(questions::id.eq(id.as_uuid())))
            .set(questions::ai_answer.eq(Some(ai_answer)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn save_content(&self, question: &Question) -> Result<(), QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(questions::table.filter(questions::id.eq(question.id.as_uuid())))
            .set(QuestionContentUpdate::from(question))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn set_resolved(
        &self,
        id: &QuestionId,
        resolved: bool,
        at: DateTime<Utc>,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(questions::table.filter(questions::id.eq(id.as_uuid())))
            .set((
                questions::is_resolved.eq(resolved),
                questions::updated_at.eq(at),
            ))
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(into_question).transpose()
    }

    async fn toggle_upvote(
        &self,
        id: &QuestionId,
        user: &UserId,
    ) -> Result<Option<VoteOutcome>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = toggle_upvote(
            &mut conn,
            VotableTable::Questions,
            *id.as_uuid(),
            *user.as_uuid(),
        )
        .await
        .map_err(map_diesel_error)?;
        Ok(row.map(VoteOutcome::from))
    }

    async fn append_answer(
        &self,
        id: &QuestionId,
        answer: &AnswerId,
    ) -> Result<(), QuestionRepositoryError> {
        self.edit_answer_ids(APPEND_ANSWER_SQL, id, answer).await
    }

    async fn remove_answer(
        &self,
        id: &QuestionId,
        answer: &AnswerId,
    ) -> Result<(), QuestionRepositoryError> {
        self.edit_answer_ids(REMOVE_ANSWER_SQL, id, answer).await
    }

    async fn delete(&self, id: &QuestionId) -> Result<bool, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(questions::table.filter(questions::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list(
        &self,
        filter: &QuestionFilter,
        page: &PageParams,
    ) -> Result<(Vec<Question>, u64), QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let offset = i64::try_from(page.offset())
            .map_err(|err| QuestionRepositoryError::query(err.to_string()))?;
        let rows: Vec<QuestionRow> = filtered(filter)
            .order((questions::created_at.desc(), questions::id.desc()))
            .offset(offset)
            .limit(i64::from(page.limit()))
            .select(QuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let total =
            u64::try_from(total).map_err(|err| QuestionRepositoryError::query(err.to_string()))?;
        Ok((into_questions(rows)?, total))
    }

    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<QuestionRow> = questions::table
            .filter(questions::author_id.eq(author.as_uuid()))
            .order((questions::created_at.desc(), questions::id.desc()))
            .select(QuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_questions(rows)
    }
}
