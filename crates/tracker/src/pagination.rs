//! Pagination controller.
//!
//! Forward moves are unconditional; backward moves stop at page 1. Every move
//! that changes the page must be followed by a fetch of the new page; a refused
//! move must not be.

use crate::PageNumber;

/// Tracks the current page of the followee listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    current: PageNumber,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current page.
    pub fn current(&self) -> PageNumber {
        self.current
    }

    /// Moves to the next page and returns it.
    pub fn advance(&mut self) -> PageNumber {
        self.current = self.current.next();
        self.current
    }

    /// Moves to the previous page and returns it, or returns `None` and stays
    /// put when already on page 1.
    pub fn retreat(&mut self) -> Option<PageNumber> {
        let prev = self.current.prev()?;
        self.current = prev;
        Some(prev)
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.current = PageNumber::FIRST;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_page() {
        assert_eq!(Pagination::new().current(), PageNumber::FIRST);
    }

    #[test]
    fn retreat_on_first_page_is_a_no_op() {
        let mut pagination = Pagination::new();
        assert_eq!(pagination.retreat(), None);
        assert_eq!(pagination.current(), PageNumber::FIRST);
    }

    #[test]
    fn advance_then_retreat_round_trips() {
        let mut pagination = Pagination::new();
        assert_eq!(pagination.advance().get(), 2);
        assert_eq!(pagination.advance().get(), 3);
        assert_eq!(pagination.retreat().map(PageNumber::get), Some(2));
        pagination.reset();
        assert!(pagination.current().is_first());
    }
}
