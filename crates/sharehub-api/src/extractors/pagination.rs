//! Pagination query parameters.

use serde::Deserialize;

use sharehub_core::types::pagination::PageRequest;

/// `?page=&limit=` query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Converts into a clamped [`PageRequest`].
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.page_size),
        )
    }
}
