//! Offset-based pagination utilities.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one.
const DEFAULT_PER_PAGE: u32 = 20;

/// Hard cap on page size to keep result sets bounded.
const MAX_PER_PAGE: u32 = 100;

/// Page/per query parameters as they arrive on the wire.
///
/// Both fields are optional; `normalize` applies defaults and clamps
/// out-of-range values instead of rejecting them.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per: Option<u32>,
}

impl PageParams {
    /// Applies defaults and bounds, returning a usable page descriptor.
    pub fn normalize(self) -> PageRequest {
        let page = self.page.unwrap_or(1).max(1);
        let per = self.per.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        PageRequest { page, per }
    }
}

/// A validated page request (1-based page number, bounded page size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per: u32,
}

impl PageRequest {
    /// SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per)
    }

    /// SQL LIMIT for this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.per)
    }
}

/// A single page of results plus paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per: u32,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            data,
            page: request.page,
            per: request.per,
            total,
        }
    }

    /// Maps the items of the page, keeping the metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            per: self.per,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults() {
        let request = PageParams::default().normalize();
        assert_eq!(request.page, 1);
        assert_eq!(request.per, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_normalize_clamps_zero_page() {
        let request = PageParams {
            page: Some(0),
            per: Some(10),
        }
        .normalize();
        assert_eq!(request.page, 1);
    }

    #[test]
    fn test_normalize_clamps_oversized_per() {
        let request = PageParams {
            page: Some(2),
            per: Some(10_000),
        }
        .normalize();
        assert_eq!(request.per, MAX_PER_PAGE);
    }

    #[test]
    fn test_offset_and_limit() {
        let request = PageParams {
            page: Some(3),
            per: Some(25),
        }
        .normalize();
        assert_eq!(request.offset(), 50);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn test_first_page_has_zero_offset() {
        let request = PageParams {
            page: Some(1),
            per: Some(50),
        }
        .normalize();
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let request = PageParams::default().normalize();
        let page = Page::new(vec![1, 2, 3], request, 3);
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.data, vec![2, 4, 6]);
        assert_eq!(mapped.page, 1);
        assert_eq!(mapped.total, 3);
    }
}
