use crate::event::Event;
use serde::Serialize;

/// 1-based window over the filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    page_number: u64,
    page_size: usize,
}

impl PageWindow {
    /// Creates a window on the given page. Page numbers below 1 clamp to 1.
    pub fn new(page_number: u64, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be > 0");
        Self {
            page_number: page_number.max(1),
            page_size,
        }
    }

    /// First page with the given size.
    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Steps back one page, saturating at the first.
    pub fn prev(self) -> Self {
        Self {
            page_number: self.page_number.saturating_sub(1).max(1),
            page_size: self.page_size,
        }
    }

    /// Advances one page. Moving past the last page is representable; under
    /// `PageOverflowPolicy::AllowBeyondEnd` such a window slices empty.
    pub fn next(self) -> Self {
        Self {
            page_number: self.page_number.saturating_add(1),
            page_size: self.page_size,
        }
    }

    /// Same window pointed at a specific page.
    pub fn at(self, page_number: u64) -> Self {
        Self::new(page_number, self.page_size)
    }
}

/// Returns the window's slice of `filtered`, clamped to its length.
///
/// A window starting past the end yields an empty slice, never an error.
pub fn paginate<'a>(filtered: &'a [Event], window: &PageWindow) -> &'a [Event] {
    let start = (window.page_number() - 1).saturating_mul(window.page_size() as u64);
    let start = start.min(filtered.len() as u64) as usize;
    let end = start.saturating_add(window.page_size()).min(filtered.len());
    &filtered[start..end]
}

/// Number of pages needed for `len` items. Zero items take zero pages.
pub fn page_count(len: usize, page_size: usize) -> u64 {
    assert!(page_size > 0, "page size must be > 0");
    len.div_ceil(page_size) as u64
}

/// Clamping applied to a window before it slices the filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOverflowPolicy {
    /// Keep the requested page even when it starts past the end, serving an
    /// empty page.
    AllowBeyondEnd,
    /// Snap an overflowing window back to the last page.
    ClampToLastPage,
}

impl Default for PageOverflowPolicy {
    fn default() -> Self {
        PageOverflowPolicy::AllowBeyondEnd
    }
}

impl PageOverflowPolicy {
    /// Applies the policy, returning the window to slice with.
    pub fn apply(self, window: PageWindow, filtered_len: usize) -> PageWindow {
        match self {
            PageOverflowPolicy::AllowBeyondEnd => window,
            PageOverflowPolicy::ClampToLastPage => {
                let last = page_count(filtered_len, window.page_size()).max(1);
                if window.page_number() > last {
                    window.at(last)
                } else {
                    window
                }
            }
        }
    }
}
