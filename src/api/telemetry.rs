use crate::api::{AppError, AppState};
use crate::state::PlayerSnapshot;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Acknowledgement for a published snapshot
#[derive(Serialize)]
struct PublishResponse {
    status: &'static str,
}

/// Full state readback: every agent's latest snapshot keyed by name
#[derive(Serialize)]
struct ReadAllResponse {
    players: HashMap<String, PlayerSnapshot>,
}

/// Agent listing row
#[derive(Serialize)]
struct AgentResponse {
    name: String,
    #[serde(rename = "lastSeen")]
    last_seen: String,
}

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/coords", get(read_states).post(publish_state))
        .route("/api/agents", get(list_agents))
        .route("/api/agents/:player", get(get_state))
}

/// POST /api/coords - Agent publishes its full state snapshot
///
/// Replacement is whole-document: the previous snapshot for the same agent
/// is discarded entirely. A rejected snapshot leaves the prior one in place.
async fn publish_state(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PublishResponse>, AppError> {
    // Check body size before deserializing
    if body.len() > state.config.limits.max_snapshot_bytes {
        return Err(AppError::PayloadTooLarge);
    }

    // Deserialize from checked bytes
    let snapshot: PlayerSnapshot = serde_json::from_slice(&body)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    snapshot.validate()?;

    let name = snapshot.name.clone();
    match state.store.replace(snapshot) {
        None => info!(agent = %name, "Agent reporting for the first time"),
        Some(_) => debug!(agent = %name, "Snapshot updated"),
    }

    Ok(Json(PublishResponse { status: "updated" }))
}

/// GET /api/coords - Every agent's latest snapshot
async fn read_states(State(state): State<Arc<AppState>>) -> Json<ReadAllResponse> {
    Json(ReadAllResponse {
        players: state.store.read_all(),
    })
}

/// GET /api/agents - List known agents with their last report time
async fn list_agents(State(state): State<Arc<AppState>>) -> Json<Vec<AgentResponse>> {
    let agents = state
        .store
        .agents()
        .into_iter()
        .map(|a| AgentResponse {
            name: a.name,
            last_seen: a.last_seen.to_rfc3339(),
        })
        .collect();

    Json(agents)
}

/// GET /api/agents/:player - Latest snapshot for one agent
async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
) -> Result<Json<PlayerSnapshot>, AppError> {
    match state.store.get(&player) {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Err(AppError::UnknownAgent(player)),
    }
}
