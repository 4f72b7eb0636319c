//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Create a request for the 1-based `page` with up to `per_page` items.
    ///
    /// # Errors
    /// Returns [Error::InvalidParameter] if `page` or `per_page` is zero.
    pub fn new(page: u64, per_page: u64) -> Result<Self, Error> {
        if page == 0 {
            return Err(Error::InvalidParameter {
                name: "page",
                value: page.to_string(),
            });
        }

        if per_page == 0 {
            return Err(Error::InvalidParameter {
                name: "perPage",
                value: per_page.to_string(),
            });
        }

        Ok(Self { page, per_page })
    }

    /// The 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of items on a page.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// The number of pages needed to show `total` items.
    pub fn page_count(&self, total: usize) -> u64 {
        (total as u64).div_ceil(self.per_page)
    }

    /// Get the items in `[(page - 1) * per_page, page * per_page)`.
    ///
    /// Pages past the end of `items` are empty.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let to_usize = |value: u64| usize::try_from(value).unwrap_or(usize::MAX);

        let start = to_usize((self.page - 1).saturating_mul(self.per_page)).min(items.len());
        let end = start.saturating_add(to_usize(self.per_page)).min(items.len());

        &items[start..end]
    }
}
