//! Application state

use std::sync::Arc;

use tl_core::suggest::OllamaClient;
use tl_core::task::SqliteTaskStore;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: SqliteTaskStore,
    suggester: OllamaClient,
    config: Config,
}

impl AppState {
    /// Create a new AppState from the process configuration
    pub async fn new(config: Config) -> tl_core::Result<Self> {
        let task_store = SqliteTaskStore::new(config.db_path()).await?;
        let suggester = OllamaClient::new(config.ollama_url.clone(), config.ollama_model.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                task_store,
                suggester,
                config,
            }),
        })
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &SqliteTaskStore {
        &self.inner.task_store
    }

    /// Get reference to the suggestion client
    pub fn suggester(&self) -> &OllamaClient {
        &self.inner.suggester
    }

    /// Get reference to the process configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
