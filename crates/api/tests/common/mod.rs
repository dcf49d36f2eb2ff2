#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use leafloop_api::config::{RuntimeMode, ServerConfig};
use leafloop_api::router::{build_app_router, with_middleware};
use leafloop_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(runtime_mode: RuntimeMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        runtime_mode,
    }
}

pub fn test_state(runtime_mode: RuntimeMode) -> AppState {
    AppState {
        config: Arc::new(test_config(runtime_mode)),
    }
}

/// Build the full application router exactly as `main.rs` does.
pub fn build_test_app(runtime_mode: RuntimeMode) -> Router {
    build_app_router(test_state(runtime_mode))
}

/// Wrap ad-hoc test routes in the production middleware stack.
pub fn build_test_app_with(routes: Router<AppState>, runtime_mode: RuntimeMode) -> Router {
    with_middleware(routes, test_state(runtime_mode))
}

/// Wrap ad-hoc test routes in the middleware stack built from `config`.
pub fn build_test_app_with_config(routes: Router<AppState>, config: ServerConfig) -> Router {
    with_middleware(
        routes,
        AppState {
            config: Arc::new(config),
        },
    )
}

/// Send a GET request to `uri`.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert that none of `keys` appear on a JSON object.
pub fn assert_absent(json: &serde_json::Value, keys: &[&str]) {
    let object = json.as_object().expect("envelope must be a JSON object");
    for key in keys {
        assert!(
            !object.contains_key(*key),
            "key `{key}` must be omitted, got: {json}"
        );
    }
}
