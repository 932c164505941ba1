//! Process configuration
//!
//! All recognized environment options are read once at startup into an
//! immutable `Config` that is passed to the components that need it.

use std::path::PathBuf;

use tl_core::suggest::DEFAULT_MODEL;

/// Immutable process-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the task database file
    pub data_dir: PathBuf,
    /// Base address of the Ollama server
    pub ollama_url: String,
    /// Chat model used for suggestions
    pub ollama_model: String,
    /// Single allowed cross-origin caller; fully permissive CORS when unset
    pub frontend_url: Option<String>,
    /// Listen port for the REST API
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("TASKS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".tasks-data")),
            ollama_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: std::env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            frontend_url: std::env::var("FRONTEND_URL").ok(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
        }
    }

    /// Path of the SQLite database file under the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("tasks.db")
    }
}
