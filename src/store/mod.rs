//!
//! # Data access
//!
//! The rest of the application talks to persistence through the narrow
//! [`TaskStore`] trait: one call per operation, no caching, every gate
//! evaluation re-reads from the store. `PgStore` is the production backend;
//! `MemoryStore` backs the tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Task, User};

/// Narrow persistence interface shared by every route.
///
/// Implementations must be thread-safe (`Send + Sync`) as they are called
/// concurrently from multiple requests.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Looks up a stored user record by username.
    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Overwrites a user's session fields: `state` as given, `timeout` set
    /// to now plus `timeout_delta_ms`. Returns the store's acknowledgement;
    /// an unknown username still acknowledges.
    async fn set_user_session(
        &self,
        username: &str,
        state: bool,
        timeout_delta_ms: i64,
    ) -> Result<bool, AppError>;

    /// Inserts a new user record.
    async fn create_user(&self, user: &User) -> Result<bool, AppError>;

    /// Lists a user's tasks in id order. Empty when the user has none.
    async fn list_tasks(&self, username: &str) -> Result<Vec<Task>, AppError>;

    /// Next id for a user's task: max existing id plus one, or 0 for a
    /// fresh user. Ids are never reused, even after deletion.
    async fn next_task_id(&self, username: &str) -> Result<i64, AppError>;

    /// Inserts a task row for the user.
    async fn create_task(&self, username: &str, id: i64, details: &str)
        -> Result<bool, AppError>;

    /// Rewrites the details of a task. True only when a row was actually
    /// modified.
    async fn update_task(&self, username: &str, id: i64, details: &str)
        -> Result<bool, AppError>;

    /// Deletes a task. True only when a row was actually removed.
    async fn delete_task(&self, username: &str, id: i64) -> Result<bool, AppError>;
}

pub use memory::MemoryStore;
pub use postgres::PgStore;
