//! Task module
//!
//! This module contains task-related types and storage.

mod model;
mod repository;
mod sqlite_store;

pub use model::Task;
pub use repository::TaskRepository;
pub use sqlite_store::SqliteTaskStore;
