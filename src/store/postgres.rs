//!
//! # Postgres backend
//!
//! Each operation checks a connection out of the shared pool, performs one
//! statement, and returns it on every exit path. Schema setup runs once at
//! startup.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Task, User};
use crate::store::TaskStore;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `users` and `tasks` tables when they are missing.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password TEXT NOT NULL,
                state    BOOLEAN NOT NULL DEFAULT FALSE,
                timeout  BIGINT NOT NULL DEFAULT 0
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (
                username TEXT NOT NULL,
                id       BIGINT NOT NULL,
                details  TEXT NOT NULL,
                PRIMARY KEY (username, id)
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password, state, timeout FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn set_user_session(
        &self,
        username: &str,
        state: bool,
        timeout_delta_ms: i64,
    ) -> Result<bool, AppError> {
        let timeout = Utc::now().timestamp_millis() + timeout_delta_ms;
        sqlx::query("UPDATE users SET state = $2, timeout = $3 WHERE username = $1")
            .bind(username)
            .bind(state)
            .bind(timeout)
            .execute(&self.pool)
            .await?;
        Ok(true)
    }

    async fn create_user(&self, user: &User) -> Result<bool, AppError> {
        sqlx::query("INSERT INTO users (username, password, state, timeout) VALUES ($1, $2, $3, $4)")
            .bind(&user.username)
            .bind(&user.password)
            .bind(user.state)
            .bind(user.timeout)
            .execute(&self.pool)
            .await?;
        Ok(true)
    }

    async fn list_tasks(&self, username: &str) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, details FROM tasks WHERE username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn next_task_id(&self, username: &str) -> Result<i64, AppError> {
        let next: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(id) + 1, 0) FROM tasks WHERE username = $1",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(next)
    }

    async fn create_task(
        &self,
        username: &str,
        id: i64,
        details: &str,
    ) -> Result<bool, AppError> {
        sqlx::query("INSERT INTO tasks (username, id, details) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(id)
            .bind(details)
            .execute(&self.pool)
            .await?;
        Ok(true)
    }

    async fn update_task(
        &self,
        username: &str,
        id: i64,
        details: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE tasks SET details = $3 WHERE username = $1 AND id = $2")
            .bind(username)
            .bind(id)
            .bind(details)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_task(&self, username: &str, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE username = $1 AND id = $2")
            .bind(username)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
