//! Task API endpoints
//!
//! RESTful API for task CRUD operations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use tl_core::task::{Task, TaskRepository};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            completed: task.completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type RouteError = (StatusCode, Json<ErrorResponse>);

fn internal_error(e: tl_core::Error) -> RouteError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn task_not_found() -> RouteError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Task not found".to_string(),
        }),
    )
}

fn empty_title() -> RouteError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: "Title cannot be empty".to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /tasks/ - List all tasks
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskResponse>>, RouteError> {
    let tasks = state.task_store().list().await.map_err(internal_error)?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /tasks/ - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), RouteError> {
    if req.title.trim().is_empty() {
        return Err(empty_title());
    }

    let created = state
        .task_store()
        .create(&req.title, req.completed)
        .await
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(created))))
}

/// GET /tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskResponse>, RouteError> {
    match state.task_store().get(id).await.map_err(internal_error)? {
        Some(task) => Ok(Json(TaskResponse::from(task))),
        None => Err(task_not_found()),
    }
}

/// PUT /tasks/{id} - Overwrite title and completed on a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, RouteError> {
    if req.title.trim().is_empty() {
        return Err(empty_title());
    }

    match state
        .task_store()
        .update(id, &req.title, req.completed)
        .await
        .map_err(internal_error)?
    {
        Some(task) => Ok(Json(TaskResponse::from(task))),
        None => Err(task_not_found()),
    }
}

/// DELETE /tasks/{id} - Delete a task, returning its last state
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskResponse>, RouteError> {
    match state.task_store().delete(id).await.map_err(internal_error)? {
        Some(task) => Ok(Json(TaskResponse::from(task))),
        None => Err(task_not_found()),
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks/", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use tl_core::task::TaskRepository;

    use crate::{config::Config, state::AppState};

    async fn build_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ollama_url: "http://127.0.0.1:1".to_string(),
            ollama_model: "test-model".to_string(),
            frontend_url: None,
            port: 0,
        };
        let state = AppState::new(config).await.unwrap();
        (state, temp_dir)
    }

    async fn body_json(body: Body) -> Value {
        serde_json::from_slice(&to_bytes(body, usize::MAX).await.unwrap()).unwrap()
    }

    #[tokio::test]
    async fn create_returns_created_task() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks/")
                    .header("Content-Type", "application/json")
                    .body(Body::from(json!({ "title": "Buy milk" }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = body_json(response.into_body()).await;
        assert!(payload["id"].as_i64().unwrap() > 0);
        assert_eq!(payload["title"], "Buy milk");
        assert_eq!(payload["completed"], false);
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks/")
                    .header("Content-Type", "application/json")
                    .body(Body::from(json!({ "title": "   " }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // Rejected before any storage access
        assert!(state.task_store().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_missing_task_returns_404() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/tasks/12345")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = body_json(response.into_body()).await;
        assert_eq!(payload["error"], "Task not found");
    }

    #[tokio::test]
    async fn get_after_create_returns_same_task() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let created = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks/")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({ "title": "Write report", "completed": true }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        let created = body_json(created.into_body()).await;
        let id = created["id"].as_i64().unwrap();

        let fetched = app
            .oneshot(
                Request::builder()
                    .uri(format!("/tasks/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(fetched.status(), StatusCode::OK);
        let fetched = body_json(fetched.into_body()).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn put_overwrites_title_and_completed() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let created = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks/")
                    .header("Content-Type", "application/json")
                    .body(Body::from(json!({ "title": "Original" }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let id = body_json(created.into_body()).await["id"].as_i64().unwrap();

        let updated = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/tasks/{id}"))
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({ "title": "x", "completed": true }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(updated.status(), StatusCode::OK);
        let updated = body_json(updated.into_body()).await;
        assert_eq!(updated["id"], id);
        assert_eq!(updated["title"], "x");
        assert_eq!(updated["completed"], true);

        // A subsequent read reflects the update
        let fetched = app
            .oneshot(
                Request::builder()
                    .uri(format!("/tasks/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let fetched = body_json(fetched.into_body()).await;
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn put_missing_task_returns_404() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/tasks/777")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({ "title": "ghost", "completed": false }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = body_json(response.into_body()).await;
        assert_eq!(payload["error"], "Task not found");
    }

    #[tokio::test]
    async fn delete_returns_last_state_then_404() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let created = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks/")
                    .header("Content-Type", "application/json")
                    .body(Body::from(json!({ "title": "Doomed" }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let created = body_json(created.into_body()).await;
        let id = created["id"].as_i64().unwrap();

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/tasks/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(deleted.status(), StatusCode::OK);
        assert_eq!(body_json(deleted.into_body()).await, created);

        let again = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/tasks/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn crud_scenario_end_to_end() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let mut ids = Vec::new();
        for title in ["A", "B"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/tasks/")
                        .header("Content-Type", "application/json")
                        .body(Body::from(json!({ "title": title }).to_string()))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            ids.push(body_json(response.into_body()).await["id"].as_i64().unwrap());
        }

        let listed = app
            .clone()
            .oneshot(Request::builder().uri("/tasks/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let listed = body_json(listed.into_body()).await;
        assert_eq!(listed.as_array().unwrap().len(), 2);

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/tasks/{}", ids[0]))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        let listed = app
            .oneshot(Request::builder().uri("/tasks/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let listed = body_json(listed.into_body()).await;
        let remaining = listed.as_array().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["id"], ids[1]);
        assert_eq!(remaining[0]["title"], "B");
    }
}
