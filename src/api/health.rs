use crate::api::AppState;
use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;

/// Liveness payload with coarse gauges for the controller dashboard
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    agents: usize,
    #[serde(rename = "pendingCommands")]
    pending_commands: usize,
}

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health))
}

/// GET / - Keep-alive check for the hosting platform and the controller
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        agents: state.store.len(),
        pending_commands: state.queue.len(),
    })
}
