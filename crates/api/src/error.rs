use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leafloop_core::error::CoreError;

use crate::response::{ApiResponse, DevDetails};

/// Public message for every unexpected failure. The real cause is logged and
/// only surfaces as `devDetails` in development mode.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred.";

/// Message accompanying a per-field `errors` map.
pub const INVALID_FIELDS_MESSAGE: &str = "One or more fields are invalid.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce a failed [`ApiResponse`] envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `leafloop_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Whether this error is an unexpected failure whose detail must be
    /// hidden from clients.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::InternalError(_) | AppError::Core(CoreError::Internal(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Captured before the match consumes `self`. The dev-details
        // middleware decides whether it reaches the body.
        let diagnostics = self.is_internal().then(|| {
            tracing::error!(error = %self, "Internal error");
            DevDetails::from_error(&self)
        });

        let (status, envelope) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    ApiResponse::error(format!("{entity} with id {id} not found"), None, None),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, ApiResponse::error(msg, None, None))
                }
                CoreError::InvalidFields(fields) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiResponse::error(INVALID_FIELDS_MESSAGE, Some(fields), None),
                ),
                CoreError::Conflict(msg) => {
                    (StatusCode::CONFLICT, ApiResponse::error(msg, None, None))
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, ApiResponse::error(msg, None, None))
                }
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, ApiResponse::error(msg, None, None))
                }
                CoreError::Internal(_) => internal_error(),
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiResponse::error(msg, None, None))
            }
            AppError::InternalError(_) => internal_error(),
        };

        let mut response = (status, Json(envelope)).into_response();
        if let Some(details) = diagnostics {
            response.extensions_mut().insert(details);
        }
        response
    }
}

fn internal_error() -> (StatusCode, ApiResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiResponse::error(INTERNAL_ERROR_MESSAGE, None, None),
    )
}
