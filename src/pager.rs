//! Pagination state tracking
//!
//! A [`Pager`] is a pure state container: it never performs I/O. It tracks
//! where iteration stands within the overall result set (current page, page
//! size, totals, and the cursor position inside the buffered page) and owns
//! the remaining-count arithmetic. A `current_page` of 0 marks the pager as
//! terminal.

/// Tracks an iterator's position within a paged result set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pager {
    /// Bound pagination to a single fetch; a second exhaustion terminates
    /// instead of requesting the next page
    single: bool,
    /// Current page number; 0 once iteration is terminal
    current_page: usize,
    /// Total number of pages, as last reported by the server
    total_pages: usize,
    /// Items per page, as reported by the server
    per_page: usize,
    /// Total items across all pages
    total_count: usize,
    /// Cursor within the currently buffered page
    position: usize,
}

impl Pager {
    /// Create a pager starting at the given page; 0 is clamped to 1.
    ///
    /// Everything else starts at zero and is populated by the first
    /// successful fetch.
    pub fn new(start: usize) -> Self {
        Self {
            current_page: start.max(1),
            ..Self::default()
        }
    }

    /// The current page number (0 when iteration is terminal)
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Total number of pages in the result set
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Total number of items across all pages
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Items per page, as last reported by the server
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Whether pagination is bounded to a single fetch
    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Number of items left to iterate
    ///
    /// When the server's reported page size exceeds the total count (a single
    /// short page) the page-offset term would overshoot, so only the local
    /// position counts against the total.
    pub fn remaining(&self) -> usize {
        if self.current_page == 0 || self.total_count == 0 {
            return 0;
        }
        if self.per_page > self.total_count {
            self.total_count.saturating_sub(self.position)
        } else {
            let consumed = self.per_page * (self.current_page - 1) + self.position;
            self.total_count.saturating_sub(consumed)
        }
    }

    pub(crate) fn set_single(&mut self, single: bool) {
        self.single = single;
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// True when the buffered page is fully consumed (including the initial
    /// state, where both position and page size are 0)
    pub(crate) fn buffer_consumed(&self) -> bool {
        self.position == self.per_page
    }

    pub(crate) fn advance(&mut self) {
        self.position += 1;
    }

    pub(crate) fn next_page(&mut self) {
        self.current_page += 1;
    }

    /// Mark iteration terminal without another fetch
    pub(crate) fn terminate(&mut self) {
        self.current_page = 0;
    }

    /// Replace page metadata with a freshly fetched snapshot; the position
    /// resets and the single-page flag survives the swap
    pub(crate) fn absorb(&mut self, snapshot: PageInfo) {
        self.current_page = snapshot.page;
        self.total_pages = snapshot.total_pages;
        self.per_page = snapshot.per_page;
        self.total_count = snapshot.total_count;
        self.position = 0;
    }
}

/// Pagination metadata decoded from one search response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    pub per_page: usize,
    pub total_count: usize,
}

/// Implemented by iterators that expose pagination progress
pub trait Pageable {
    /// Pagination statistics for the underlying result set
    fn info(&self) -> &Pager;
}
