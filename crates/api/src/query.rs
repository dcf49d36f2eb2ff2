//! Shared query parameter types for API handlers.

use serde::Deserialize;

use crate::response::DataResponse;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page-number pagination parameters (`?page=&pageSize=`).
///
/// Pages are 1-based. Out-of-range values are clamped rather than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Requested page, at least 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Requested page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of rows to skip for the requested page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }

    /// Number of pages needed for `total_items` at the requested page size.
    pub fn total_pages(&self, total_items: i64) -> i64 {
        if total_items <= 0 {
            0
        } else {
            (total_items - 1) / self.page_size() + 1
        }
    }

    /// Wrap one page of results in a paginated success envelope.
    pub fn paginate<T>(&self, data: T, total_items: i64) -> DataResponse<T> {
        DataResponse::success_with_page(
            data,
            total_items,
            self.total_pages(total_items),
            self.page(),
        )
    }
}
