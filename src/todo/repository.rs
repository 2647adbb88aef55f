//! Repository layer for the `todo` table

use sqlx::PgPool;

use super::models::Todo;

pub struct TodoRepository;

impl TodoRepository {
    /// All todos, newest first
    pub async fn list_recent(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        let rows: Vec<Todo> = sqlx::query_as(
            r#"SELECT id, name, created_at
               FROM todo ORDER BY created_at DESC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Insert and return the stored row
    pub async fn create(pool: &PgPool, todo: &Todo) -> Result<Todo, sqlx::Error> {
        let row: Todo = sqlx::query_as(
            r#"INSERT INTO todo (id, name, created_at)
               VALUES ($1, $2, $3)
               RETURNING id, name, created_at"#,
        )
        .bind(&todo.id)
        .bind(&todo.name)
        .bind(todo.created_at)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Delete by id. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
