//! Shared response envelope types for API handlers.
//!
//! Every endpoint answers with one of two envelopes:
//!
//! - [`ApiResponse`] -- outcome only: `{ "success", "message", "errors"?, "devDetails"? }`.
//! - [`DataResponse<T>`] -- outcome plus payload: `{ "success", "message", "data"?,
//!   "totalItems"?, "totalPages"?, "currentPage"? }`.
//!
//! Both are built exclusively through named constructors, so a successful
//! envelope can never carry failure detail and pagination metadata is always
//! complete. Absent optional fields are omitted from the JSON rather than
//! serialized as `null`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leafloop_core::types::FieldErrors;
use serde::{Deserialize, Deserializer, Serialize};

/// Message used by the success constructors when the caller supplies none.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation successful.";

/// Rejection raised when a deserialized envelope breaks the shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("a successful response cannot carry errors or devDetails")]
    FailureDetailOnSuccess,

    #[error("totalItems, totalPages and currentPage must be present together")]
    PartialPage,
}

// ---------------------------------------------------------------------------
// DevDetails
// ---------------------------------------------------------------------------

/// Diagnostic detail for unexpected failures.
///
/// Only ever attached to a response while the service runs in development
/// mode; see [`crate::config::RuntimeMode::gate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevDetails {
    /// Display form of the failing error.
    pub error: String,
    /// Display forms of the error's `source()` chain, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl DevDetails {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            causes: Vec::new(),
        }
    }

    /// Capture an error and its full `source()` chain.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            error: err.to_string(),
            causes,
        }
    }
}

// ---------------------------------------------------------------------------
// ApiResponse
// ---------------------------------------------------------------------------

/// Outcome-only response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(ApiResponse::success_with_message("Item archived."))
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawApiResponse")]
pub struct ApiResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dev_details: Option<DevDetails>,
}

impl ApiResponse {
    /// Successful outcome with [`DEFAULT_SUCCESS_MESSAGE`].
    pub fn success() -> Self {
        Self::success_with_message(DEFAULT_SUCCESS_MESSAGE)
    }

    pub fn success_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
            dev_details: None,
        }
    }

    /// Failed outcome.
    ///
    /// `errors` carries per-field violations. `dev_details` must come from
    /// [`crate::config::RuntimeMode::gate`] so production responses never
    /// expose diagnostics.
    pub fn error(
        message: impl Into<String>,
        errors: Option<FieldErrors>,
        dev_details: Option<DevDetails>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors,
            dev_details,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    pub fn dev_details(&self) -> Option<&DevDetails> {
        self.dev_details.as_ref()
    }
}

/// `200 OK` for successes, `400 Bad Request` for failures. Handlers needing a
/// different status return `(StatusCode, ApiResponse)`.
impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApiResponse {
    success: bool,
    message: String,
    errors: Option<FieldErrors>,
    dev_details: Option<DevDetails>,
}

impl TryFrom<RawApiResponse> for ApiResponse {
    type Error = EnvelopeError;

    fn try_from(raw: RawApiResponse) -> Result<Self, Self::Error> {
        if raw.success && (raw.errors.is_some() || raw.dev_details.is_some()) {
            return Err(EnvelopeError::FailureDetailOnSuccess);
        }
        Ok(Self {
            success: raw.success,
            message: raw.message,
            errors: raw.errors,
            dev_details: raw.dev_details,
        })
    }
}

// ---------------------------------------------------------------------------
// DataResponse
// ---------------------------------------------------------------------------

/// Pagination metadata carried by [`DataResponse::success_with_page`].
///
/// Pure carrier: no relationship between the three values is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Response envelope carrying a payload of type `T`.
///
/// # Example
///
/// ```ignore
/// Ok(DataResponse::success_with_data(items))
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "RawDataResponse<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct DataResponse<T> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(flatten)]
    page: Option<PageMeta>,
}

impl<T> DataResponse<T> {
    /// Successful outcome carrying `data`, with [`DEFAULT_SUCCESS_MESSAGE`].
    pub fn success_with_data(data: T) -> Self {
        Self::success_with_data_and_message(data, DEFAULT_SUCCESS_MESSAGE)
    }

    pub fn success_with_data_and_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            page: None,
        }
    }

    /// Successful outcome carrying one page of results.
    ///
    /// The caller computes the pagination values; see
    /// [`crate::query::PaginationParams::paginate`].
    pub fn success_with_page(
        data: T,
        total_items: i64,
        total_pages: i64,
        current_page: i64,
    ) -> Self {
        Self::success_with_page_and_message(
            data,
            total_items,
            total_pages,
            current_page,
            DEFAULT_SUCCESS_MESSAGE,
        )
    }

    pub fn success_with_page_and_message(
        data: T,
        total_items: i64,
        total_pages: i64,
        current_page: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            page: Some(PageMeta {
                total_items,
                total_pages,
                current_page,
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn page(&self) -> Option<PageMeta> {
        self.page
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
struct RawDataResponse<T> {
    success: bool,
    message: String,
    // A present `data` key, even `null`, is a payload; only a missing key is `None`.
    #[serde(default, deserialize_with = "present")]
    data: Option<T>,
    total_items: Option<i64>,
    total_pages: Option<i64>,
    current_page: Option<i64>,
}

impl<T> TryFrom<RawDataResponse<T>> for DataResponse<T> {
    type Error = EnvelopeError;

    fn try_from(raw: RawDataResponse<T>) -> Result<Self, Self::Error> {
        let page = match (raw.total_items, raw.total_pages, raw.current_page) {
            (Some(total_items), Some(total_pages), Some(current_page)) => Some(PageMeta {
                total_items,
                total_pages,
                current_page,
            }),
            (None, None, None) => None,
            _ => return Err(EnvelopeError::PartialPage),
        };

        Ok(Self {
            success: raw.success,
            message: raw.message,
            data: raw.data,
            page,
        })
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
