//! SQLite-backed task storage implementation
//!
//! Stores tasks in a single `tasks` table behind a connection pool. Each
//! statement runs on a pooled connection that is returned to the pool when
//! the call completes, on every exit path.

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::SqlitePool;

use super::model::Task;
use super::repository::TaskRepository;
use crate::Result;

/// SQLite task store
#[derive(Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
            .map_err(sqlx::Error::from)?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0
            )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TaskRepository for SqliteTaskStore {
    async fn create(&self, title: &str, completed: bool) -> Result<Task> {
        let result = sqlx::query("INSERT INTO tasks (title, completed) VALUES (?, ?)")
            .bind(title)
            .bind(completed)
            .execute(&self.pool)
            .await?;

        let task = sqlx::query_as("SELECT id, title, completed FROM tasks WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(&self.pool)
            .await?;

        Ok(task)
    }

    async fn get(&self, id: i64) -> Result<Option<Task>> {
        let task = sqlx::query_as("SELECT id, title, completed FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as("SELECT id, title, completed FROM tasks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn update(&self, id: i64, title: &str, completed: bool) -> Result<Option<Task>> {
        let rows_affected = sqlx::query("UPDATE tasks SET title = ?, completed = ? WHERE id = ?")
            .bind(title)
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<Option<Task>> {
        let existing = match self.get(id).await? {
            Some(task) => task,
            None => return Ok(None),
        };

        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Some(existing))
    }
}
