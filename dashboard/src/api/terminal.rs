//! Command execution endpoint - spawns a shell command and streams its
//! combined output back as a chunked plain-text response.
//!
//! Spawn failures are reported inside the 200 stream as a colored error
//! line, not as an HTTP status: the stream model commits the status before
//! the spawn outcome is known. Only request validation (400) and endpoint
//! setup failures (500) use HTTP status codes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared_types::CommandRequest;

use crate::api::ApiState;
use crate::config::resolve_workdir;
use crate::runner;
use crate::stream;

pub async fn execute_command(
    State(state): State<ApiState>,
    Json(req): Json<CommandRequest>,
) -> Response {
    if req.command.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Command is required").into_response();
    }

    let workdir = resolve_workdir(req.cwd.as_deref(), &state.config);
    tracing::info!(
        command = %req.command,
        workdir = %workdir.display(),
        "executing terminal command"
    );

    let chunks = runner::spawn_command(
        &req.command,
        &workdir,
        &state.config.shell,
        state.config.output_cap_bytes,
    );
    let body = Body::from_stream(stream::encode_output(chunks));

    match Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body)
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "failed to build streaming response");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
