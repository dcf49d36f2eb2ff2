//! Attaches `devDetails` to error envelopes in development mode.
//!
//! [`crate::error::AppError`] never writes diagnostics into the body; it
//! leaves a [`DevDetails`] response extension instead. This middleware removes
//! that extension from every response and, when
//! [`RuntimeMode::gate`](crate::config::RuntimeMode::gate) lets it through,
//! rebuilds the error envelope with the details included.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::response::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::INTERNAL_ERROR_MESSAGE;
use crate::response::{ApiResponse, DevDetails};
use crate::state::AppState;

/// Upper bound on an error body we are willing to buffer and rewrite.
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

pub async fn reveal_dev_details(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(details) = response.extensions_mut().remove::<DevDetails>() else {
        return response;
    };
    let Some(details) = state.config.runtime_mode.gate(details) else {
        return response;
    };

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to buffer error response body");
            return replace_with_internal_error(parts);
        }
    };

    let envelope = match serde_json::from_slice::<ApiResponse>(&bytes) {
        Ok(envelope) if !envelope.is_success() => envelope,
        Ok(_) => return Response::from_parts(parts, Body::from(bytes)),
        Err(err) => {
            tracing::warn!(error = %err, "Error response body is not an envelope");
            return Response::from_parts(parts, Body::from(bytes));
        }
    };

    let envelope = ApiResponse::error(
        envelope.message(),
        envelope.errors().cloned(),
        Some(details),
    );
    match serde_json::to_vec(&envelope) {
        Ok(body) => rebuild(parts, body),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to serialize error envelope");
            Response::from_parts(parts, Body::from(bytes))
        }
    }
}

/// The original body is gone, so answer with the generic internal-error
/// envelope under the original status and headers.
fn replace_with_internal_error(mut parts: Parts) -> Response {
    let envelope = ApiResponse::error(INTERNAL_ERROR_MESSAGE, None, None);
    match serde_json::to_vec(&envelope) {
        Ok(body) => {
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            rebuild(parts, body)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to serialize error envelope");
            rebuild(parts, Vec::new())
        }
    }
}

fn rebuild(mut parts: Parts, body: Vec<u8>) -> Response {
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body))
}
