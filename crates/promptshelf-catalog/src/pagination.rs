//! Fixed-size pagination over a match list.

use serde::Serialize;
use std::ops::Range;

/// Entries shown per page.
pub const PAGE_SIZE: usize = 12;

/// Page arithmetic for `total_items` matches viewed at `current_page`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Number of matching entries.
    pub total_items: usize,
    /// Entries per page.
    pub page_size: usize,
    /// 1-based page being viewed.
    pub current_page: usize,
}

impl Pagination {
    /// Pagination with the default page size.
    pub fn new(total_items: usize, current_page: usize) -> Self {
        Self::with_page_size(total_items, current_page, PAGE_SIZE)
    }

    /// Pagination with an explicit page size (at least 1).
    pub fn with_page_size(total_items: usize, current_page: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: page_size.max(1),
            current_page: current_page.max(1),
        }
    }

    /// `ceil(total_items / page_size)`; zero when nothing matches.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// The same pagination with `current_page` clamped to an existing page.
    pub fn clamped(&self) -> Self {
        Self {
            current_page: self.current_page.clamp(1, self.total_pages().max(1)),
            ..*self
        }
    }

    /// Index range of the current page, clipped to the available items.
    /// Empty when the page lies beyond the last one.
    pub fn range(&self) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// `1..=total_pages`, for page-number links.
    pub fn page_numbers(&self) -> Range<usize> {
        1..self.total_pages() + 1
    }

    /// Position label, e.g. `"2 of 3"`. `"0 of 0"` when nothing matches.
    pub fn label(&self) -> String {
        match self.total_pages() {
            0 => "0 of 0".to_string(),
            total => format!("{} of {}", self.current_page, total),
        }
    }
}

/// Slice `items` to `page` (1-based) with [`PAGE_SIZE`] entries per page.
///
/// Returns the page slice and the total page count.
pub fn paginate<T>(items: &[T], page: usize) -> (&[T], usize) {
    let pagination = Pagination::new(items.len(), page);
    (&items[pagination.range()], pagination.total_pages())
}
