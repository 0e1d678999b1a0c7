//! Pagination state and client-side page slicing.

/// Default page size when none is configured.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page sizes offered by the pagination controls by default.
pub const DEFAULT_PER_PAGE_OPTIONS: &[usize] = &[10, 20, 50, 100];

/// 1-based page number and page size.
///
/// `page_number >= 1` and `items_per_page >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_number: usize,
    items_per_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl PaginationState {
    /// First page with the given page size (zero is treated as one).
    #[must_use]
    pub fn new(items_per_page: usize) -> Self {
        Self {
            page_number: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    #[must_use]
    pub fn with_page(items_per_page: usize, page_number: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            items_per_page: items_per_page.max(1),
        }
    }

    #[must_use]
    pub const fn page_number(&self) -> usize {
        self.page_number
    }

    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn set_page_number(&mut self, page_number: usize) {
        self.page_number = page_number.max(1);
    }

    /// Change the page size and go back to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.page_number = 1;
    }

    /// Index of the first item on the current page. Saturates at `usize::MAX`.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page_number - 1).saturating_mul(self.items_per_page)
    }

    /// Number of pages needed for `total` items; never less than one.
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        let pages = total.div_ceil(self.items_per_page);
        if pages == 0 { 1 } else { pages }
    }

    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.page_number == 1
    }

    #[must_use]
    pub const fn is_last_page(&self, total: usize) -> bool {
        self.page_number >= self.page_count(total)
    }

    /// Advance one page, stopping at the last page for `total` items.
    pub fn next_page(&mut self, total: usize) {
        if !self.is_last_page(total) {
            self.page_number += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page_number > 1 {
            self.page_number -= 1;
        }
    }

    pub fn first_page(&mut self) {
        self.page_number = 1;
    }

    pub fn last_page(&mut self, total: usize) {
        self.page_number = self.page_count(total);
    }

    /// Pull the page number back onto the last page that exists for `total` items.
    ///
    /// Returns `true` if the page number changed.
    pub fn clamp_to(&mut self, total: usize) -> bool {
        let last = self.page_count(total);
        if self.page_number > last {
            tracing::debug!(
                from = self.page_number,
                to = last,
                total,
                "clamping page number"
            );
            self.page_number = last;
            true
        } else {
            false
        }
    }
}

/// The slice of `items` on the current page; empty when the page starts past the end.
pub fn apply_pagination<'a, I>(items: &'a [I], pagination: &PaginationState) -> &'a [I] {
    let start = pagination.offset().min(items.len());
    let end = start
        .saturating_add(pagination.items_per_page())
        .min(items.len());
    &items[start..end]
}
