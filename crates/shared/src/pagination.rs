//! Page-based pagination parameters.

use serde::Deserialize;

/// Default page number when the caller omits it.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size when the caller omits it.
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum page size accepted from callers.
pub const MAX_LIMIT: i64 = 100;

/// Query parameters shared by all list endpoints.
///
/// `page` is 1-based. The row offset is normally derived as
/// `(page - 1) * limit`; an explicit `offset` always wins over the
/// derived value. List cache keys incorporate page and limit only,
/// never the explicit offset.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: Option<i64>,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            offset: None,
        }
    }
}

impl PageParams {
    /// Creates parameters for the given page and limit with no explicit offset.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            offset: None,
        }
    }

    /// Resolves the row offset to use for the store query.
    pub fn resolve_offset(&self) -> i64 {
        match self.offset {
            Some(offset) => offset,
            None => (self.page - 1) * self.limit,
        }
    }
}
