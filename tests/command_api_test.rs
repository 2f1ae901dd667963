// Integration tests for command submission and polling

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use beacon::api::{create_router, AppState};
use beacon::config::BeaconConfig;
use beacon::queue::CommandQueue;
use beacon::state::StateStore;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> Router {
    create_test_app_with_config(BeaconConfig::default())
}

fn create_test_app_with_config(config: BeaconConfig) -> Router {
    let state = AppState {
        queue: Arc::new(CommandQueue::new(config.queue.max_pending)),
        store: Arc::new(StateStore::new()),
        config: Arc::new(config),
    };
    create_router(state)
}

async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// POST /api/command acknowledges with the queued command echoed back.
#[tokio::test]
async fn test_submit_returns_ack_with_echo() {
    let app = create_test_app();

    let response = post_json(
        &app,
        "/api/command",
        serde_json::json!({
            "player": "Alice",
            "command": "give",
            "args": ["diamond_sword", "1"]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["queued"]["player"], "Alice");
    assert_eq!(json["queued"]["command"], "give");
    assert_eq!(json["queued"]["args"][0], "diamond_sword");
}

/// A submitted command comes back on the next poll, then the queue is empty.
#[tokio::test]
async fn test_submit_then_poll_round_trip() {
    let app = create_test_app();

    post_json(
        &app,
        "/api/command",
        serde_json::json!({
            "player": "Alice",
            "command": "give",
            "args": ["diamond_sword", "1"]
        }),
    )
    .await;

    let response = get(&app, "/api/command").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["command"]["player"], "Alice");
    assert_eq!(json["command"]["command"], "give");
    assert_eq!(
        json["command"]["args"],
        serde_json::json!(["diamond_sword", "1"])
    );

    // Delivered exactly once — the next poll finds nothing
    let json = body_json(get(&app, "/api/command").await).await;
    assert!(json["command"].is_null());
}

/// Polling an empty queue is 200 with an explicit null command, not an error.
#[tokio::test]
async fn test_poll_empty_returns_null_command() {
    let app = create_test_app();

    let response = get(&app, "/api/command").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let envelope = json.as_object().unwrap();
    assert!(envelope.contains_key("command"));
    assert!(json["command"].is_null());
}

/// Commands come back in strict submission order.
#[tokio::test]
async fn test_polls_preserve_submission_order() {
    let app = create_test_app();

    for name in ["first", "second", "third"] {
        post_json(
            &app,
            "/api/command",
            serde_json::json!({"command": name, "args": []}),
        )
        .await;
    }

    for name in ["first", "second", "third"] {
        let json = body_json(get(&app, "/api/command").await).await;
        assert_eq!(json["command"]["command"], name);
    }

    let json = body_json(get(&app, "/api/command").await).await;
    assert!(json["command"].is_null());
}

/// A command without a player is claimable by anyone; the poll response
/// omits the player key rather than sending null.
#[tokio::test]
async fn test_untargeted_command_omits_player() {
    let app = create_test_app();

    post_json(
        &app,
        "/api/command",
        serde_json::json!({"command": "say", "args": ["hello"]}),
    )
    .await;

    let json = body_json(get(&app, "/api/command").await).await;
    let cmd = json["command"].as_object().unwrap();
    assert!(!cmd.contains_key("player"));
    assert_eq!(json["command"]["command"], "say");
}

/// Malformed JSON is rejected with 400 and an error body.
#[tokio::test]
async fn test_submit_malformed_json_returns_400() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/command")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

/// An empty command verb is rejected.
#[tokio::test]
async fn test_submit_empty_command_returns_400() {
    let app = create_test_app();

    let response = post_json(
        &app,
        "/api/command",
        serde_json::json!({"command": "", "args": []}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The rejected command was not queued
    let json = body_json(get(&app, "/api/command").await).await;
    assert!(json["command"].is_null());
}

/// Missing args is a structural error, not defaulted to empty.
#[tokio::test]
async fn test_submit_missing_args_returns_400() {
    let app = create_test_app();

    let response = post_json(
        &app,
        "/api/command",
        serde_json::json!({"player": "Alice", "command": "give"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// An empty-string player names nobody and is rejected.
#[tokio::test]
async fn test_submit_empty_player_returns_400() {
    let app = create_test_app();

    let response = post_json(
        &app,
        "/api/command",
        serde_json::json!({"player": "", "command": "give", "args": []}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A full queue answers 503 and keeps what it already holds; draining frees
/// a slot.
#[tokio::test]
async fn test_queue_full_returns_503() {
    let mut config = BeaconConfig::default();
    config.queue.max_pending = 1;
    let app = create_test_app_with_config(config);

    let first = post_json(
        &app,
        "/api/command",
        serde_json::json!({"command": "a", "args": []}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(
        &app,
        "/api/command",
        serde_json::json!({"command": "b", "args": []}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(second).await;
    assert!(json["error"].as_str().unwrap().contains("full"));

    // The queued command survived the rejection
    let json = body_json(get(&app, "/api/command").await).await;
    assert_eq!(json["command"]["command"], "a");

    // And the freed slot accepts new work
    let third = post_json(
        &app,
        "/api/command",
        serde_json::json!({"command": "c", "args": []}),
    )
    .await;
    assert_eq!(third.status(), StatusCode::OK);
}

/// Oversized submission bodies are rejected before deserialization.
#[tokio::test]
async fn test_oversized_command_returns_413() {
    let mut config = BeaconConfig::default();
    config.limits.max_command_bytes = 32;
    let app = create_test_app_with_config(config);

    let response = post_json(
        &app,
        "/api/command",
        serde_json::json!({"command": "give", "args": ["x".repeat(100)]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json = body_json(response).await;
    assert_eq!(json["error"], "payload too large");
}

/// GET / reports liveness plus coarse queue and store gauges.
#[tokio::test]
async fn test_health_reports_counts() {
    let app = create_test_app();

    let json = body_json(get(&app, "/").await).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["agents"], 0);
    assert_eq!(json["pendingCommands"], 0);

    post_json(
        &app,
        "/api/command",
        serde_json::json!({"command": "a", "args": []}),
    )
    .await;
    post_json(
        &app,
        "/api/command",
        serde_json::json!({"command": "b", "args": []}),
    )
    .await;

    let json = body_json(get(&app, "/").await).await;
    assert_eq!(json["pendingCommands"], 2);
}
