//! Persistence gateway for tasks
//!
//! A [`Store`] stages changes (`insert`, `update`, `delete`) and makes them durable on [`Store::commit`].
//! Reads observe staged changes. [`Store::rollback`] discards whatever has not been committed yet.

pub mod local_store;
pub use local_store::LocalStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::task::{TaskId, TaskRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid store contents: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("task {0} is already in the store")]
    DuplicateId(TaskId),

    #[error("task {0} is not in the store")]
    Missing(TaskId),

    /// Only produced by mocked stores, in tests
    #[error("{0}")]
    Mocked(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the tasks due between `from` and `to` (both included), regardless of their time of day.
    /// Tasks are returned in the order they have been inserted
    async fn query_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<TaskRecord>, StoreError>;

    /// Returns the tasks due on `day`, in the order they have been inserted
    async fn query_day(&self, day: NaiveDate) -> Result<Vec<TaskRecord>, StoreError> {
        self.query_range(day, day).await
    }

    /// Returns the task with the given ID, if any
    async fn get(&self, id: &TaskId) -> Result<Option<TaskRecord>, StoreError>;

    /// Stage a new task. Fails if a task with the same ID already exists
    async fn insert(&mut self, task: TaskRecord) -> Result<(), StoreError>;

    /// Stage a replacement of the task with the same ID
    async fn update(&mut self, task: TaskRecord) -> Result<(), StoreError>;

    /// Stage the removal of a task
    async fn delete(&mut self, id: &TaskId) -> Result<(), StoreError>;

    /// Durably persist every staged change, atomically.
    /// When this fails, the staged changes are still pending
    async fn commit(&mut self) -> Result<(), StoreError>;

    /// Discard every staged change
    fn rollback(&mut self);
}
