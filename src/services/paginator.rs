//! Slicing a filtered view into fixed-size pages.

use serde::Serialize;

use crate::models::pagination::{page_window, PagedResult, Pagination};

/// Edge and neighbour widths of the page-number window.
const WINDOW_LEFT_EDGE: usize = 2;
const WINDOW_LEFT_CURRENT: usize = 2;
const WINDOW_RIGHT_CURRENT: usize = 4;
const WINDOW_RIGHT_EDGE: usize = 2;

/// Visible slice of `view` for the (clamped) requested page.
pub fn paginate<T: Serialize + Clone>(view: &[T], pagination: &Pagination) -> PagedResult<T> {
    let total = view.len();
    let per_page = pagination.limit();
    let total_pages = pagination.total_pages(total);
    let page = pagination.current_page(total);

    let start = pagination.offset(total).min(total);
    let end = (start + per_page).min(total);

    PagedResult {
        items: view[start..end].to_vec(),
        total,
        page,
        per_page,
        total_pages,
        pages: page_window(
            total_pages,
            page,
            WINDOW_LEFT_EDGE,
            WINDOW_LEFT_CURRENT,
            WINDOW_RIGHT_CURRENT,
            WINDOW_RIGHT_EDGE,
        ),
    }
}
