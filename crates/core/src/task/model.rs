//! Task model definitions

use serde::{Deserialize, Serialize};

/// A tracked to-do item.
///
/// The `id` is assigned by the store on insert and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}
