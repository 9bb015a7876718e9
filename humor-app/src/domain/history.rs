use super::caption::CaptionWithVotes;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// Largest row offset a SQL `OFFSET` accepts.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Offset/limit window for a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub per_page: u64,
}

impl PageWindow {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Saturates, so a page past any real row count still yields an empty window.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page).min(MAX_OFFSET)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }

    /// Inclusive row range, as `range(from, to)` style stores expect.
    pub fn range(&self) -> (u64, u64) {
        let end = self.page.saturating_mul(self.per_page).min(MAX_OFFSET) - 1;
        (self.offset(), end)
    }

    pub fn total_pages(&self, total_count: u64) -> u64 {
        total_count.div_ceil(self.per_page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotedHistoryPage {
    pub captions: Vec<CaptionWithVotes>,
    pub total_count: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub error: Option<String>,
}

impl VotedHistoryPage {
    pub fn failed(current_page: u64, error: impl Into<String>) -> Self {
        Self {
            captions: Vec::new(),
            total_count: 0,
            current_page,
            total_pages: 0,
            error: Some(error.into()),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_for_first_pages() {
        let w = PageWindow::new(1, 20);
        assert_eq!(w.offset(), 0);
        assert_eq!(w.range(), (0, 19));

        let w = PageWindow::new(3, 20);
        assert_eq!(w.offset(), 40);
        assert_eq!(w.range(), (40, 59));
        assert_eq!(w.limit(), 20);
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        assert_eq!(PageWindow::new(0, 20), PageWindow::new(1, 20));
        assert_eq!(PageWindow::new(2, 0).per_page, 1);
        assert_eq!(PageWindow::new(2, 5_000).per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_huge_page_saturates() {
        let w = PageWindow::new(u64::MAX, 20);
        assert_eq!(w.offset(), i64::MAX as u64);
        let (from, to) = w.range();
        assert!(from <= to + 1);
        assert_eq!(w.limit(), 20);

        let w = PageWindow::new(u64::MAX / 2, u64::MAX);
        assert_eq!(w.per_page, MAX_PER_PAGE);
        assert_eq!(w.offset(), i64::MAX as u64);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let w = PageWindow::new(1, 20);
        assert_eq!(w.total_pages(0), 0);
        assert_eq!(w.total_pages(1), 1);
        assert_eq!(w.total_pages(20), 1);
        assert_eq!(w.total_pages(21), 2);
        assert_eq!(w.total_pages(59), 3);
    }

    #[test]
    fn test_navigation_flags() {
        let mut page = VotedHistoryPage {
            captions: Vec::new(),
            total_count: 45,
            current_page: 1,
            total_pages: 3,
            error: None,
        };
        assert!(!page.has_previous());
        assert!(page.has_next());
        page.current_page = 3;
        assert!(page.has_previous());
        assert!(!page.has_next());
    }
}
