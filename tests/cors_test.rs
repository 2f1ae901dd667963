// Integration tests for the CORS layer
//
// The layer has two shapes: no configured origins (anything goes, no
// credentials) and an explicit origin list (exact matches only, with
// credentials). Both are asserted through the response headers a browser
// would act on.

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

fn create_test_app_with_config(config: BeaconConfig) -> Router {
    let state = AppState {
        queue: Arc::new(CommandQueue::new(config.queue.max_pending)),
        store: Arc::new(StateStore::new()),
        config: Arc::new(config),
    };
    create_router(state)
}

fn app_with_origins(origins: &[&str]) -> Router {
    let mut config = BeaconConfig::default();
    config.cors.allowed_origins = origins.iter().map(|s| s.to_string()).collect();
    create_test_app_with_config(config)
}

async fn get_with_origin(app: &Router, uri: &str, origin: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("Origin", origin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// With no configured origins any caller is allowed, without credentials.
#[tokio::test]
async fn test_unconfigured_cors_allows_any_origin() {
    let app = create_test_app_with_config(BeaconConfig::default());

    let response = get_with_origin(&app, "/", "http://anywhere.example.com").await;
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .unwrap();
    assert_eq!(allow_origin.to_str().unwrap(), "*");

    assert!(response
        .headers()
        .get("access-control-allow-credentials")
        .is_none());
}

/// A listed origin is echoed back exactly and credentials are enabled.
#[tokio::test]
async fn test_configured_origin_echoed_with_credentials() {
    let app = app_with_origins(&["http://controller.example.com"]);

    let response = get_with_origin(&app, "/", "http://controller.example.com").await;
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .unwrap();
    assert_eq!(allow_origin.to_str().unwrap(), "http://controller.example.com");

    let credentials = response
        .headers()
        .get("access-control-allow-credentials")
        .unwrap();
    assert_eq!(credentials.to_str().unwrap(), "true");
}

/// An origin outside the list gets no allow-origin header; the request
/// itself still succeeds, enforcement is the browser's job.
#[tokio::test]
async fn test_foreign_origin_gets_no_allow_header() {
    let app = app_with_origins(&["http://controller.example.com"]);

    let response = get_with_origin(&app, "/", "http://evil.example.com").await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

/// A malformed configured origin is skipped; the valid entries still work.
#[tokio::test]
async fn test_malformed_origin_skipped_valid_ones_kept() {
    let app = app_with_origins(&["http://controller.example.com", "http://bad\norigin"]);

    let response = get_with_origin(&app, "/", "http://controller.example.com").await;
    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .unwrap();
    assert_eq!(allow_origin.to_str().unwrap(), "http://controller.example.com");
}
