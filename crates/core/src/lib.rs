//! Core library for Tasklight
//!
//! This crate contains the core business logic, including:
//! - Task storage and the repository contract
//! - The Ollama suggestion gateway

pub mod error;
pub mod suggest;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
