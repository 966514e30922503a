//! SQLite QuestionRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{
    BindValue, QuestionFilter, build_limit_offset_clause, build_question_filter, matches_search,
};
use crate::db::{
    DbError, DbResult, Id, ListResult, NewQuestion, Question, QuestionQuery, QuestionRepository,
};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// SQLx-backed question repository.
pub struct SqliteQuestionRepository {
    pub(crate) pool: SqlitePool,
}

impl SqliteQuestionRepository {
    async fn count_matching(&self, count_sql: &str, bind_values: &[BindValue]) -> DbResult<usize> {
        let mut count_query = sqlx::query_scalar::<_, i64>(count_sql);
        for value in bind_values {
            count_query = match value {
                BindValue::Int(v) => count_query.bind(*v),
                BindValue::Text(v) => count_query.bind(v.as_str()),
            };
        }

        let total = count_query.fetch_one(&self.pool).await?;
        Ok(total as usize)
    }

    /// Rows passing the SQL filter, then narrowed by the search term.
    async fn fetch_searched(
        &self,
        filter: &QuestionFilter,
        order_by: &str,
        term: &str,
    ) -> DbResult<Vec<Question>> {
        let sql = format!(
            "SELECT {} FROM question {} ORDER BY {}",
            QUESTION_COLUMNS, filter.where_clause, order_by
        );

        let mut query_builder = sqlx::query(&sql);
        for value in &filter.bind_values {
            query_builder = match value {
                BindValue::Int(v) => query_builder.bind(*v),
                BindValue::Text(v) => query_builder.bind(v.as_str()),
            };
        }

        let rows = query_builder.fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(row_to_question)
            .filter(|q| matches_search(&q.question, term))
            .collect())
    }
}

fn row_to_question(row: &SqliteRow) -> Question {
    Question {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        difficulty: row.get("difficulty"),
    }
}

impl QuestionRepository for SqliteQuestionRepository {
    async fn create(&self, question: &NewQuestion) -> DbResult<Question> {
        let result = sqlx::query(
            "INSERT INTO question (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&self.pool)
        .await?;

        Ok(question.clone().with_id(result.last_insert_rowid()))
    }

    async fn get(&self, id: Id) -> DbResult<Question> {
        let sql = format!("SELECT {} FROM question WHERE id = ?", QUESTION_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(row_to_question)
            .ok_or_else(|| DbError::not_found("Question", id))
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM question WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Question", id));
        }

        Ok(())
    }

    async fn list(&self, query: Option<&QuestionQuery>) -> DbResult<ListResult<Question>> {
        let default_query = QuestionQuery::default();
        let query = query.unwrap_or(&default_query);

        let filter = build_question_filter(query);
        let offset = query.page.offset.unwrap_or(0);

        if let Some(term) = &query.search {
            let matching = self.fetch_searched(&filter, "id ASC", term).await?;
            let total = matching.len();
            let items = matching
                .into_iter()
                .skip(offset)
                .take(query.page.limit.unwrap_or(usize::MAX))
                .collect();

            return Ok(ListResult {
                items,
                total,
                limit: query.page.limit,
                offset,
            });
        }

        let limit_clause = build_limit_offset_clause(&query.page);

        let sql = format!(
            "SELECT {} FROM question {} ORDER BY id ASC{}",
            QUESTION_COLUMNS, filter.where_clause, limit_clause
        );
        let count_sql = format!("SELECT COUNT(*) FROM question {}", filter.where_clause);

        // Get paginated results
        let mut query_builder = sqlx::query(&sql);
        for value in &filter.bind_values {
            query_builder = match value {
                BindValue::Int(v) => query_builder.bind(*v),
                BindValue::Text(v) => query_builder.bind(v.as_str()),
            };
        }

        let rows = query_builder.fetch_all(&self.pool).await?;
        let items: Vec<Question> = rows.iter().map(row_to_question).collect();

        let total = self.count_matching(&count_sql, &filter.bind_values).await?;

        Ok(ListResult {
            items,
            total,
            limit: query.page.limit,
            offset,
        })
    }

    async fn count(&self, query: Option<&QuestionQuery>) -> DbResult<usize> {
        let default_query = QuestionQuery::default();
        let query = query.unwrap_or(&default_query);
        let filter = build_question_filter(query);

        if let Some(term) = &query.search {
            return Ok(self.fetch_searched(&filter, "id ASC", term).await?.len());
        }

        let count_sql = format!("SELECT COUNT(*) FROM question {}", filter.where_clause);

        self.count_matching(&count_sql, &filter.bind_values).await
    }

    async fn random(&self, query: &QuestionQuery) -> DbResult<Option<Question>> {
        let filter = build_question_filter(query);

        if let Some(term) = &query.search {
            let shuffled = self.fetch_searched(&filter, "RANDOM()", term).await?;
            return Ok(shuffled.into_iter().next());
        }

        let sql = format!(
            "SELECT {} FROM question {} ORDER BY RANDOM() LIMIT 1",
            QUESTION_COLUMNS, filter.where_clause
        );

        let mut query_builder = sqlx::query(&sql);
        for value in &filter.bind_values {
            query_builder = match value {
                BindValue::Int(v) => query_builder.bind(*v),
                BindValue::Text(v) => query_builder.bind(v.as_str()),
            };
        }

        let row = query_builder.fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(row_to_question))
    }
}
