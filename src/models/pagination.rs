//! Pagination primitives shared across all list views.

use serde::{Deserialize, Serialize};

/// Allowed page sizes. The smallest is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Twenty, PageSize::Fifty];

    pub fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
        }
    }

    /// Map a raw number from a page-size picker onto an allowed option.
    pub fn from_value(value: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.get() == value)
    }
}

/// Requested page and page size for one list view.
///
/// `page` is 1-based and signed so that out-of-range requests (0 or
/// negative) can be represented and clamped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: PageSize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

impl Pagination {
    pub fn limit(&self) -> usize {
        self.page_size.get()
    }

    /// Total number of pages for `total` items; never less than one.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit()).max(1)
    }

    /// Requested page clamped into `[1, total_pages]`.
    pub fn current_page(&self, total: usize) -> usize {
        let last = self.total_pages(total) as i64;
        self.page.clamp(1, last) as usize
    }

    pub fn offset(&self, total: usize) -> usize {
        (self.current_page(total) - 1) * self.limit()
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

/// Visible slice of a filtered view with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    /// Page numbers for navigation controls; `None` marks a gap.
    pub pages: Vec<Option<usize>>,
}

/// Page-number window: `left_edge` pages at the start, the pages around
/// `current_page`, and `right_edge` pages at the end, with `None` gaps.
pub fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;
    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);
    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}
