//! Paginated result envelope.

use serde::{Deserialize, Serialize};

/// One page of results plus the total row count across all pages.
///
/// `data` is always ordered by descending creation time. The envelope is
/// what the list cache stores, so the whole page round-trips as one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        Self {
            data,
            total,
            page,
            limit,
        }
    }
}
