use recordkit_sql::Select;

use serde::{Deserialize, Serialize};

/// Page request and result metadata.
///
/// Paging applies only when both `current` and `page_size` are set and
/// positive. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: Option<u64>,
    pub page_size: Option<u64>,
    pub total: Option<i64>,
}

/// Page and page size used where a [`Pagination`] leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub current: u64,
    pub page_size: u64,
}

impl Default for PageDefaults {
    fn default() -> Self {
        PageDefaults {
            current: 1,
            page_size: 20,
        }
    }
}

impl Pagination {
    pub fn new(current: u64, page_size: u64) -> Pagination {
        Pagination {
            current: Some(current),
            page_size: Some(page_size),
            total: None,
        }
    }

    /// Current page and page size, only when both are set.
    fn page(&self) -> Option<(u64, u64)> {
        Some((self.current?, self.page_size?))
    }

    pub fn is_required(&self) -> bool {
        matches!(self.page(), Some((current, page_size)) if current > 0 && page_size > 0)
    }

    pub fn current(&self, defaults: &PageDefaults) -> u64 {
        self.page().map_or(defaults.current, |(current, _)| current)
    }

    /// Rows per page.
    pub fn limit(&self, defaults: &PageDefaults) -> u64 {
        self.page().map_or(defaults.page_size, |(_, page_size)| page_size)
    }

    /// Rows skipped before the current page; 0 when paging is unset.
    pub fn offset(&self, defaults: &PageDefaults) -> u64 {
        match self.page() {
            Some(_) => self
                .current(defaults)
                .saturating_sub(1)
                .saturating_mul(self.limit(defaults)),
            None => 0,
        }
    }

    /// Add `LIMIT` and `OFFSET` to a query when paging is required.
    pub fn apply(&self, select: Select) -> Select {
        match self.page() {
            Some((current, page_size)) if current > 0 && page_size > 0 => select
                .limit(page_size)
                .offset((current - 1).saturating_mul(page_size)),
            _ => select,
        }
    }

    /// This request with unset paging replaced by the defaults.
    pub fn or_default(&self, defaults: &PageDefaults) -> Pagination {
        Pagination {
            current: Some(self.current(defaults)),
            page_size: Some(self.limit(defaults)),
            total: None,
        }
    }

    /// Response metadata for a page of a result of `total` rows.
    pub fn with_total(&self, total: i64, defaults: &PageDefaults) -> Pagination {
        Pagination {
            total: Some(total),
            ..self.or_default(defaults)
        }
    }
}
