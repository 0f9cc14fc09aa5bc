//! Shared statements and helpers for the Diesel repositories.
//!
//! Upvote sets live in `UUID[]` columns. Toggling is one `UPDATE` that either
//! removes or appends the voter, so concurrent toggles on the same row are
//! serialised by the row lock and the reported direction always matches the
//! stored state.

use diesel::sql_query;
use diesel::sql_types::Uuid as SqlUuid;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::models::VoteToggleRow;

/// Tables that carry an `upvotes UUID[]` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotableTable {
    Questions,
    Answers,
    Comments,
}

impl VotableTable {
    const fn name(self) -> &'static str {
        match self {
            Self::Questions => "questions",
            Self::Answers => "answers",
            Self::Comments => "comments",
        }
    }
}

/// Statement flipping `$2` in the `upvotes` set of row `$1`.
pub fn toggle_upvote_sql(table: VotableTable) -> String {
    format!(
        "UPDATE {table} SET upvotes = CASE \
             WHEN $2 = ANY(upvotes) THEN array_remove(upvotes, $2) \
             ELSE array_append(upvotes, $2) END \
         WHERE id = $1 \
         RETURNING ($2 = ANY(upvotes)) AS added, cardinality(upvotes)::BIGINT AS upvote_count",
        table = table.name()
    )
}

/// Run the toggle for `voter` on row `id`, returning `None` when the row is
/// missing.
pub async fn toggle_upvote(
    conn: &mut AsyncPgConnection,
    table: VotableTable,
    id: Uuid,
    voter: Uuid,
) -> Result<Option<VoteToggleRow>, diesel::result::Error> {
    let rows: Vec<VoteToggleRow> = sql_query(toggle_upvote_sql(table))
        .bind::<SqlUuid, _>(id)
        .bind::<SqlUuid, _>(voter)
        .load(conn)
        .await?;
    Ok(rows.into_iter().next())
}

/// Escape `%`, `_`, and `\` so user text matches literally inside `ILIKE`.
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VotableTable::Questions, "UPDATE questions SET")]
    #[case(VotableTable::Answers, "UPDATE answers SET")]
    #[case(VotableTable::Comments, "UPDATE comments SET")]
    fn toggle_targets_the_named_table(#[case] table: VotableTable, #[case] prefix: &str) {
        let sql = toggle_upvote_sql(table);
        assert!(sql.starts_with(prefix), "unexpected statement: {sql}");
        assert!(sql.contains("array_remove(upvotes, $2)"));
        assert!(sql.contains("RETURNING ($2 = ANY(upvotes)) AS added"));
    }

    #[rstest]
    #[case("rust", "%rust%")]
    #[case("100%", "%100\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    #[case("a\\b", "%a\\\\b%")]
    fn like_patterns_escape_wildcards(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(needle), expected);
    }
}
