//! Runtime-mode gating of `devDetails` through the full middleware stack.
//!
//! Production responses must never include diagnostics, whatever the
//! handler tried to attach; development responses include them for
//! unexpected failures only.

mod common;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get as route_get;
use axum::Router;
use common::{assert_absent, body_json, build_test_app_with, get};
use leafloop_api::config::RuntimeMode;
use leafloop_api::error::{AppError, AppResult, INTERNAL_ERROR_MESSAGE};
use leafloop_api::response::{ApiResponse, DevDetails};
use leafloop_api::state::AppState;
use leafloop_core::error::CoreError;

async fn internal_failure() -> AppResult<ApiResponse> {
    Err(AppError::InternalError("connection pool exhausted".into()))
}

async fn conflict() -> AppResult<ApiResponse> {
    Err(AppError::Core(CoreError::Conflict("listing already sold".into())))
}

async fn panicking() -> ApiResponse {
    panic!("eco-score overflow")
}

/// Handler that builds its own error envelope, routing diagnostics through
/// the runtime-mode gate.
async fn hand_built(State(state): State<AppState>) -> (StatusCode, ApiResponse) {
    let details = DevDetails::new("at checkout::finalize");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiResponse::error(
            "Checkout failed.",
            None,
            state.config.runtime_mode.gate(details),
        ),
    )
}

/// Error response too large for the middleware to buffer.
async fn oversized() -> Response {
    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        "x".repeat(128 * 1024),
    )
        .into_response();
    response
        .extensions_mut()
        .insert(DevDetails::new("oversized body"));
    response
}

async fn ok() -> ApiResponse {
    ApiResponse::success()
}

fn test_routes() -> Router<AppState> {
    Router::new()
        .route("/internal", route_get(internal_failure))
        .route("/conflict", route_get(conflict))
        .route("/panic", route_get(panicking))
        .route("/hand-built", route_get(hand_built))
        .route("/oversized", route_get(oversized))
        .route("/ok", route_get(ok))
}

fn app(mode: RuntimeMode) -> Router {
    build_test_app_with(test_routes(), mode)
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

#[tokio::test]
async fn production_internal_error_has_no_dev_details() {
    let response = get(app(RuntimeMode::Production), "/internal").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    assert_absent(&json, &["devDetails"]);
    assert!(!json.to_string().contains("pool exhausted"));
}

#[tokio::test]
async fn production_panic_has_no_dev_details() {
    let response = get(app(RuntimeMode::Production), "/panic").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    assert_absent(&json, &["devDetails"]);
}

#[tokio::test]
async fn production_gate_drops_hand_built_dev_details() {
    let response = get(app(RuntimeMode::Production), "/hand-built").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Checkout failed.");
    assert_absent(&json, &["devDetails"]);
}

// ---------------------------------------------------------------------------
// Development
// ---------------------------------------------------------------------------

#[tokio::test]
async fn development_internal_error_includes_dev_details() {
    let response = get(app(RuntimeMode::Development), "/internal").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    assert_eq!(
        json["devDetails"]["error"],
        "Internal error: connection pool exhausted"
    );
    assert_absent(&json, &["errors"]);
}

#[tokio::test]
async fn development_panic_includes_panic_message() {
    let response = get(app(RuntimeMode::Development), "/panic").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    let error = json["devDetails"]["error"].as_str().unwrap();
    assert!(error.contains("eco-score overflow"), "got: {error}");
}

#[tokio::test]
async fn development_gate_keeps_hand_built_dev_details() {
    let response = get(app(RuntimeMode::Development), "/hand-built").await;

    let json = body_json(response).await;
    assert_eq!(json["devDetails"]["error"], "at checkout::finalize");
}

#[tokio::test]
async fn development_client_errors_stay_without_dev_details() {
    let response = get(app(RuntimeMode::Development), "/conflict").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["message"], "listing already sold");
    assert_absent(&json, &["devDetails"]);
}

#[tokio::test]
async fn unbufferable_error_body_becomes_internal_error_envelope() {
    let response = get(app(RuntimeMode::Development), "/oversized").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({ "success": false, "message": INTERNAL_ERROR_MESSAGE })
    );
}

#[tokio::test]
async fn success_is_untouched_in_either_mode() {
    for mode in [RuntimeMode::Development, RuntimeMode::Production] {
        let response = get(app(mode), "/ok").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "message": "Operation successful." })
        );
    }
}
