//! Page requests and the `{ data, meta }` list envelope.
//!
//! Pages are 1-indexed and hold between 1 and 50 items. An empty result
//! still reports one page.

use serde::Serialize;

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, from 1.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Default number of items per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    /// Smallest accepted page size.
    pub const MIN_PAGE_SIZE: u32 = 1;
    /// Largest accepted page size.
    pub const MAX_PAGE_SIZE: u32 = 50;

    /// Creates a page request, returning `None` when either bound is violated.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Option<Self> {
        if page == 0 || !(Self::MIN_PAGE_SIZE..=Self::MAX_PAGE_SIZE).contains(&page_size) {
            return None;
        }
        Some(Self { page, page_size })
    }

    /// Rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.index() * self.limit()
    }

    /// Rows on a full page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Zero-based page index, as used by SeaORM paginators.
    #[must_use]
    pub fn index(&self) -> u64 {
        u64::from(self.page.saturating_sub(1))
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Position of a page within the full result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(request.page_size.max(1)))
        };

        Self {
            data,
            meta: PageMeta {
                page: request.page,
                page_size: request.page_size,
                total,
                total_pages,
            },
        }
    }

    /// Cuts one page out of an already complete, ordered result.
    #[must_use]
    pub fn from_vec(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let data = items.into_iter().skip(skip).take(take).collect();
        Self::new(data, request, total)
    }

    /// Converts the page items while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
