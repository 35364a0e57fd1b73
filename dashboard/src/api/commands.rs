//! Command catalog endpoint.

use axum::response::IntoResponse;
use axum::Json;

use crate::catalog;

pub async fn list_commands() -> impl IntoResponse {
    Json(catalog::command_catalog())
}
