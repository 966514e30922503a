//! SQLite CategoryRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::{Category, CategoryRepository, DbError, DbResult, Id};

/// SQLx-backed category repository.
pub struct SqliteCategoryRepository {
    pub(crate) pool: SqlitePool,
}

impl CategoryRepository for SqliteCategoryRepository {
    async fn get(&self, id: Id) -> DbResult<Category> {
        let row = sqlx::query("SELECT id, type FROM category WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or_else(|| DbError::not_found("Category", id))?;

        Ok(Category {
            id: row.get("id"),
            kind: row.get("type"),
        })
    }

    async fn list(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, type FROM category ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.get("id"),
                kind: row.get("type"),
            })
            .collect())
    }
}
