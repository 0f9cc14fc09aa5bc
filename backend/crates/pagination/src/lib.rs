//! Page-number pagination primitives shared by list endpoints.
//!
//! [`PageParams`] validates the `page`/`limit` pair supplied by clients and
//! exposes the offset adapters need. [`Page`] is the response envelope carrying
//! the requested slice together with the page count derived from the total
//! number of matching records.

use serde::{Deserialize, Serialize};

/// Page number used when the client omits one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client omits one.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures for pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// Page size must be within `1..=MAX_LIMIT`.
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange {
        /// Largest accepted limit.
        max: u32,
    },
}

/// Validated page request.
///
/// # Examples
/// ```
/// use pagination::PageParams;
///
/// let params = PageParams::new(Some(3), Some(20)).expect("valid page");
/// assert_eq!(params.offset(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    page: u32,
    limit: u32,
}

impl PageParams {
    /// Build parameters from optional client input, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when `page` is zero or `limit` falls
    /// outside `1..=MAX_LIMIT`.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PaginationError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page == 0 {
            return Err(PaginationError::PageOutOfRange);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PaginationError::LimitOutOfRange { max: MAX_LIMIT });
        }
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip before the page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.limit)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of pages for the query.
    pub total_pages: u64,
    /// The page that was requested.
    pub current_page: u32,
    /// Total number of matching records.
    pub total: u64,
}

impl<T> Page<T> {
    /// Build a page from its items and the total number of matching records.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageParams};
    ///
    /// let params = PageParams::new(Some(2), Some(10)).expect("valid page");
    /// let page = Page::new(vec![1, 2, 3], 13, params);
    /// assert_eq!(page.total_pages, 2);
    /// assert_eq!(page.current_page, 2);
    /// ```
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, params: PageParams) -> Self {
        Self {
            items,
            total_pages: total.div_ceil(u64::from(params.limit)),
            current_page: params.page,
            total,
        }
    }

    /// Transform every item while keeping the navigation metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            current_page: self.current_page,
            total: self.total,
        }
    }
}
