//! # API Response Types
//!
//! Shared response shapes for list endpoints and simple acknowledgements.
//!
//! ## List Format
//!
//! ```json
//! {
//!   "items": [ ... ],
//!   "pagination": {
//!     "page": 1,
//!     "pageSize": 10,
//!     "totalCount": 42,
//!     "totalPages": 5,
//!     "hasNextPage": true,
//!     "hasPreviousPage": false
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Pagination envelope returned by every list endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (1-indexed).
    pub page:              u64,
    /// Requested page size.
    pub page_size:         u64,
    /// Number of rows matching the filter.
    pub total_count:       u64,
    /// `ceil(total_count / page_size)`.
    pub total_pages:       u64,
    pub has_next_page:     bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    /// Build the envelope for a page.
    ///
    /// `page` and `page_size` are expected to be at least 1; a zero page size
    /// yields zero pages instead of dividing by zero.
    pub fn new(page: u64, page_size: u64, total_count: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        }
        else {
            total_count.div_ceil(page_size)
        };

        Self {
            page,
            page_size,
            total_count,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }

    /// Row offset of the first item on this page.
    ///
    /// Returns `None` if the offset calculation would overflow.
    pub fn offset(&self) -> Option<u64> { self.page.checked_sub(1)?.checked_mul(self.page_size) }

    /// Calculate limit.
    pub fn limit(&self) -> u64 { self.page_size }
}

/// A page of items plus its pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items:      Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: PaginationMeta) -> Self {
        Self {
            items,
            pagination,
        }
    }

    /// Convert every item while keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items:      self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Plain acknowledgement body, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[inline]
    pub fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
