use axum::extract::State;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::config::RuntimeMode;
use crate::response::DataResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Mode the service was started in.
    pub runtime_mode: RuntimeMode,
}

/// GET /health -- returns service status wrapped in the data envelope.
async fn health_check(State(state): State<AppState>) -> DataResponse<HealthStatus> {
    DataResponse::success_with_data(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        runtime_mode: state.config.runtime_mode,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
