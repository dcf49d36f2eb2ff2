pub mod health;

use axum::http::StatusCode;

use crate::response::ApiResponse;

/// Message returned for requests that match no route.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";

/// Message returned when a request exceeds the configured timeout.
pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timed out.";

/// Fallback handler: unknown routes still answer with an error envelope.
pub async fn not_found() -> (StatusCode, ApiResponse) {
    (
        StatusCode::NOT_FOUND,
        ApiResponse::error(NOT_FOUND_MESSAGE, None, None),
    )
}
