//!
//! # In-memory backend
//!
//! Backs the test suite and small demo deployments. Clones share the same
//! underlying state, so a test can hold a handle and inspect what a
//! request persisted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::{Task, User};
use crate::store::TaskStore;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<String, User>,
    tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone)]
struct TaskRow {
    username: String,
    id: i64,
    details: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.get(username).cloned())
    }

    async fn set_user_session(
        &self,
        username: &str,
        state: bool,
        timeout_delta_ms: i64,
    ) -> Result<bool, AppError> {
        let mut inner = self.lock();
        if let Some(user) = inner.users.get_mut(username) {
            user.state = state;
            user.timeout = Utc::now().timestamp_millis() + timeout_delta_ms;
        }
        Ok(true)
    }

    async fn create_user(&self, user: &User) -> Result<bool, AppError> {
        self.lock()
            .users
            .insert(user.username.clone(), user.clone());
        Ok(true)
    }

    async fn list_tasks(&self, username: &str) -> Result<Vec<Task>, AppError> {
        let mut tasks: Vec<Task> = self
            .lock()
            .tasks
            .iter()
            .filter(|row| row.username == username)
            .map(|row| Task {
                id: row.id,
                details: row.details.clone(),
            })
            .collect();
        tasks.sort_by_key(|task| task.id);
        Ok(tasks)
    }

    async fn next_task_id(&self, username: &str) -> Result<i64, AppError> {
        let next = self
            .lock()
            .tasks
            .iter()
            .filter(|row| row.username == username)
            .map(|row| row.id)
            .max()
            .map_or(0, |max| max + 1);
        Ok(next)
    }

    async fn create_task(
        &self,
        username: &str,
        id: i64,
        details: &str,
    ) -> Result<bool, AppError> {
        self.lock().tasks.push(TaskRow {
            username: username.to_string(),
            id,
            details: details.to_string(),
        });
        Ok(true)
    }

    async fn update_task(
        &self,
        username: &str,
        id: i64,
        details: &str,
    ) -> Result<bool, AppError> {
        let mut inner = self.lock();
        match inner
            .tasks
            .iter_mut()
            .find(|row| row.username == username && row.id == id)
        {
            Some(row) => {
                row.details = details.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_task(&self, username: &str, id: i64) -> Result<bool, AppError> {
        let mut inner = self.lock();
        let before = inner.tasks.len();
        inner
            .tasks
            .retain(|row| !(row.username == username && row.id == id));
        Ok(inner.tasks.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_task_ids_are_monotonic_and_never_reused() {
        let store = MemoryStore::new();
        for expected in 0..3 {
            let id = store.next_task_id("ann").await.unwrap();
            assert_eq!(id, expected);
            assert!(store.create_task("ann", id, "x").await.unwrap());
        }

        assert!(store.delete_task("ann", 1).await.unwrap());
        assert_eq!(store.next_task_id("ann").await.unwrap(), 3);
    }

    #[actix_rt::test]
    async fn test_tasks_are_scoped_by_username() {
        let store = MemoryStore::new();
        store.create_task("ann", 0, "hers").await.unwrap();
        store.create_task("bob", 0, "his").await.unwrap();

        let tasks = store.list_tasks("ann").await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].details, "hers");
        assert_eq!(store.next_task_id("bob").await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn test_update_and_delete_report_misses() {
        let store = MemoryStore::new();
        assert!(!store.update_task("ann", 0, "x").await.unwrap());
        assert!(!store.delete_task("ann", 0).await.unwrap());
    }

    #[actix_rt::test]
    async fn test_session_update_ignores_unknown_users() {
        let store = MemoryStore::new();
        // Unknown usernames still acknowledge, matching the Postgres
        // backend's UPDATE semantics.
        assert!(store.set_user_session("ghost", true, 1000).await.unwrap());
        assert!(store.get_user("ghost").await.unwrap().is_none());
    }
}
