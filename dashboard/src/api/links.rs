//! Reference link endpoints - list/create/delete over the in-memory store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared_types::CreateLink;

use crate::api::ApiState;

pub async fn list_links(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.links.list())
}

pub async fn create_link(
    State(state): State<ApiState>,
    Json(req): Json<CreateLink>,
) -> impl IntoResponse {
    if req.title.trim().is_empty() || req.url.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "title and url are required"
            })),
        )
            .into_response();
    }

    let link = state.links.create(req);
    (StatusCode::CREATED, Json(link)).into_response()
}

pub async fn delete_link(
    Path(link_id): Path<String>,
    State(state): State<ApiState>,
) -> impl IntoResponse {
    if state.links.delete(&link_id) {
        (StatusCode::OK, Json(json!({ "success": true }))).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": format!("no link with id {link_id}")
            })),
        )
            .into_response()
    }
}
