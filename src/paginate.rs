// Paginator: windows the ordered hotels into fixed-size pages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn first(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    pub fn with_page(self, current_page: usize) -> Self {
        Self {
            current_page,
            ..self
        }
    }
}

// Number of pages needed for `len` items; an empty result still has one page
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    pub window: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    // Page buttons to render, 1-based
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages
    }
}

/// 1-based inclusive `(first, last)` positions of a window, as in "Showing 10-18 of 25".
/// `None` when the window is empty or the page number is 0.
pub fn showing_range(page: PageState, window_len: usize) -> Option<(usize, usize)> {
    if window_len == 0 || page.current_page == 0 {
        return None;
    }
    let first = (page.current_page - 1) * page.page_size + 1;
    Some((first, first + window_len - 1))
}

/// Slices out page `page.current_page` of `records`.
///
/// Pages past the end produce an empty window rather than an error.
pub fn paginate<T>(records: &[T], page: PageState) -> Page<'_, T> {
    let page_size = page.page_size.max(1);
    let start = page
        .current_page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(records.len());
    let end = start.saturating_add(page_size).min(records.len());

    Page {
        window: &records[start..end],
        current_page: page.current_page,
        total_pages: total_pages(records.len(), page_size),
    }
}
