use crate::api::{AppError, AppState};
use crate::command::Command;
use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Acknowledgement for a submitted command
#[derive(Serialize)]
struct SubmitResponse {
    status: &'static str,
    queued: Command,
}

/// Poll envelope.
///
/// The command field is emitted even when null, so an empty queue is always
/// distinguishable from a delivered command.
#[derive(Serialize)]
struct PollResponse {
    command: Option<Command>,
}

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/command", get(poll_command).post(submit_command))
}

/// POST /api/command - Controller submits a command for dispatch
async fn submit_command(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SubmitResponse>, AppError> {
    // Check body size before deserializing
    if body.len() > state.config.limits.max_command_bytes {
        return Err(AppError::PayloadTooLarge);
    }

    // Deserialize from checked bytes
    let cmd: Command = serde_json::from_slice(&body)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    cmd.validate()?;

    state.queue.enqueue(cmd.clone())?;

    info!(
        command = %cmd.name,
        target = cmd.target.as_deref().unwrap_or("any"),
        args = cmd.args.len(),
        "Command queued"
    );

    Ok(Json(SubmitResponse {
        status: "ok",
        queued: cmd,
    }))
}

/// GET /api/command - Next pending command for whichever agent polls first
///
/// An empty queue answers 200 with a null command; polling idle is the
/// normal state of this endpoint, not a failure.
async fn poll_command(State(state): State<Arc<AppState>>) -> Json<PollResponse> {
    let command = state.queue.dequeue();

    if let Some(cmd) = &command {
        debug!(
            command = %cmd.name,
            target = cmd.target.as_deref().unwrap_or("any"),
            "Command delivered"
        );
    }

    Json(PollResponse { command })
}
