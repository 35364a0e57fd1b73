//! HTTP API routes for the FDE Dashboard server.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::json;

pub mod commands;
pub mod links;
pub mod tasks;
pub mod terminal;

use crate::config::Config;
use crate::store::{LinkStore, TaskStore};

#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<Config>,
    pub tasks: TaskStore,
    pub links: LinkStore,
}

impl ApiState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            tasks: TaskStore::new(),
            links: LinkStore::new(),
        }
    }
}

/// Configure all API routes
pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health_check))
        // Terminal execution bridge
        .route("/api/terminal/execute", post(terminal::execute_command))
        // Predefined command catalog
        .route("/api/commands", get(commands::list_commands))
        // Task routes
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{task_id}",
            patch(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/api/tasks/{task_id}/toggle", post(tasks::toggle_task))
        // Reference link routes
        .route("/api/links", get(links::list_links).post(links::create_link))
        .route("/api/links/{link_id}", delete(links::delete_link))
}

/// Health check endpoint
pub async fn health_check(State(_state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "fde-dashboard",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
