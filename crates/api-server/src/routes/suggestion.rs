//! Task suggestion endpoint
//!
//! Forwards a task title to the configured Ollama server and returns the
//! model's reply. No storage access on this path.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// POST /suggestions/ - Ask the model how to complete a task
async fn suggest_task_completion(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<SuggestionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let suggestion = state.suggester().suggest(&query.title).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(SuggestionResponse { suggestion }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/suggestions/", post(suggest_task_completion))
}
