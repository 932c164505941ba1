//! Suggestion module
//!
//! This module provides integration with an Ollama server for generating
//! task completion suggestions.

mod ollama_client;

pub use ollama_client::{OllamaClient, DEFAULT_MODEL};
