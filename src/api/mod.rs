// HTTP API: controller-facing and agent-facing routes

mod actions;
mod commands;
mod health;
mod telemetry;

use crate::command::ValidationError;
use crate::config::{BeaconConfig, CorsConfig};
use crate::queue::{CommandQueue, QueueFull};
use crate::state::{SnapshotError, StateStore};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Shared application state
///
/// The queue and store are owned here and injected into every handler, so
/// tests can build isolated instances per case.
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<CommandQueue>,
    pub store: Arc<StateStore>,
    pub config: Arc<BeaconConfig>,
}

/// Create API router with all routes and the CORS layer applied
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);
    Router::new()
        .merge(health::routes())
        .merge(commands::routes())
        .merge(telemetry::routes())
        .merge(actions::routes())
        .with_state(Arc::new(state))
        .layer(cors)
}

/// Build the CORS layer from configuration.
///
/// With no configured origins anything goes, without credentials. With an
/// explicit origin list only those origins are allowed and credentials are
/// enabled, which is what the controller frontend deployment needs.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Application error types shared by all handlers
pub(crate) enum AppError {
    ValidationError(String),
    PayloadTooLarge,
    QueueFull(String),
    UnknownAgent(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload too large".to_string())
            }
            AppError::QueueFull(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::UnknownAgent(name) => (
                StatusCode::NOT_FOUND,
                format!("no state reported for agent '{}'", name),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

impl From<SnapshotError> for AppError {
    fn from(e: SnapshotError) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

impl From<QueueFull> for AppError {
    fn from(e: QueueFull) -> Self {
        // Every rejected submission surfaces through this conversion
        warn!(capacity = e.capacity, "Rejecting submission, queue at capacity");
        AppError::QueueFull(e.to_string())
    }
}
