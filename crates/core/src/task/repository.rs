//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Repository interface for task CRUD operations
///
/// Absence is always reported as `Ok(None)`, never as an error, so callers
/// are forced to handle the missing-row case explicitly.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task and return it with its assigned id
    async fn create(&self, title: &str, completed: bool) -> Result<Task>;

    /// Get a task by id
    async fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Get all tasks in storage order
    async fn list(&self) -> Result<Vec<Task>>;

    /// Overwrite title and completed on an existing task
    async fn update(&self, id: i64, title: &str, completed: bool) -> Result<Option<Task>>;

    /// Delete a task by id, returning its last state
    async fn delete(&self, id: i64) -> Result<Option<Task>>;
}
