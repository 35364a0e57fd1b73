//! Task list endpoints - CRUD plus status toggle over the in-memory store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared_types::{CreateTask, UpdateTask};

use crate::api::ApiState;

pub async fn list_tasks(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.tasks.list())
}

pub async fn create_task(
    State(state): State<ApiState>,
    Json(req): Json<CreateTask>,
) -> impl IntoResponse {
    if req.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "title is required"
            })),
        )
            .into_response();
    }

    let task = state.tasks.create(req);
    (StatusCode::CREATED, Json(task)).into_response()
}

pub async fn update_task(
    Path(task_id): Path<String>,
    State(state): State<ApiState>,
    Json(req): Json<UpdateTask>,
) -> impl IntoResponse {
    match state.tasks.update(&task_id, req) {
        Some(task) => (StatusCode::OK, Json(task)).into_response(),
        None => task_not_found(&task_id),
    }
}

pub async fn toggle_task(
    Path(task_id): Path<String>,
    State(state): State<ApiState>,
) -> impl IntoResponse {
    match state.tasks.toggle_status(&task_id) {
        Some(task) => (StatusCode::OK, Json(task)).into_response(),
        None => task_not_found(&task_id),
    }
}

pub async fn delete_task(
    Path(task_id): Path<String>,
    State(state): State<ApiState>,
) -> impl IntoResponse {
    if state.tasks.delete(&task_id) {
        (StatusCode::OK, Json(json!({ "success": true }))).into_response()
    } else {
        task_not_found(&task_id)
    }
}

fn task_not_found(task_id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": format!("no task with id {task_id}")
        })),
    )
        .into_response()
}
