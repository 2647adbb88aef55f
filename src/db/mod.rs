//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

const CREATE_TODO_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todo (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)"#;

const CREATE_TODO_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS todo_created_at_idx ON todo (created_at DESC)";

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `todo` table if it does not exist yet
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TODO_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_TODO_CREATED_AT_INDEX)
            .execute(&self.pool)
            .await?;
        tracing::info!("Todo schema ready");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
