//! Page index / page size bookkeeping.
//!
//! Every setter clamps instead of failing, so the state can never point at a page past the end
//! of the data.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
    total_count: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    pub fn with_total_count(mut self, total_count: usize) -> Self {
        self.set_total_count(total_count);
        self
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// `ceil(total / size)`, never less than one so an empty table still shows "page 1 of 1".
    pub fn page_count(&self) -> usize {
        self.total_count.div_ceil(self.page_size).max(1)
    }

    pub fn last_page_index(&self) -> usize {
        self.page_count() - 1
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index < self.last_page_index()
    }

    /// Returns `true` if the index changed.
    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        let next = page_index.min(self.last_page_index());
        let changed = next != self.page_index;
        self.page_index = next;
        changed
    }

    /// Moves by `delta` pages. Targets before the first page clamp to it.
    pub fn page_by(&mut self, delta: isize) -> bool {
        let target = self.page_index.saturating_add_signed(delta);
        self.set_page_index(target)
    }

    pub fn first_page(&mut self) -> bool {
        self.set_page_index(0)
    }

    pub fn last_page(&mut self) -> bool {
        self.set_page_index(self.last_page_index())
    }

    /// Changes the page size while keeping the previously first visible row on screen.
    ///
    /// A size of zero is treated as one.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return false;
        }
        let first_row = self.first_row_index();
        self.page_size = page_size;
        self.page_index = (first_row / page_size).min(self.last_page_index());
        true
    }

    /// Returns `true` if the count or the (re-clamped) index changed.
    pub fn set_total_count(&mut self, total_count: usize) -> bool {
        let before = *self;
        self.total_count = total_count;
        self.page_index = self.page_index.min(self.last_page_index());
        *self != before
    }

    fn first_row_index(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Row positions covered by the current page, bounded by `total_count`.
    pub fn visible_range(&self) -> Range<usize> {
        bounded_range(self.first_row_index(), self.page_size, self.total_count)
    }

    /// The current page of `rows`, which must already be filtered and sorted.
    pub fn visible_slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[bounded_range(self.first_row_index(), self.page_size, rows.len())]
    }

    /// 1-based `(first, last)` row numbers of the current page, for "11-20 of 42" labels.
    pub fn row_range(&self) -> Option<(usize, usize)> {
        let range = self.visible_range();
        if range.is_empty() {
            return None;
        }
        Some((range.start + 1, range.end))
    }
}

fn bounded_range(start: usize, len: usize, total: usize) -> Range<usize> {
    let start = start.min(total);
    let end = start.saturating_add(len).min(total);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_has_floor_of_one() {
        for total in [0usize, 1, 9, 10, 11, 100] {
            for size in [1usize, 3, 10, 25] {
                let p = PaginationState::new(size).with_total_count(total);
                assert_eq!(p.page_count(), total.div_ceil(size).max(1), "{total}/{size}");
            }
        }
    }

    #[test]
    fn page_index_clamps_to_last_page() {
        let mut p = PaginationState::new(3).with_total_count(10);
        assert!(p.set_page_index(99));
        assert_eq!(p.page_index(), 3);
        assert!(!p.set_page_index(3));
    }

    #[test]
    fn empty_dataset_pins_first_page() {
        let mut p = PaginationState::new(5);
        assert!(!p.set_page_index(4));
        assert_eq!(p.page_index(), 0);
        assert_eq!(p.visible_range(), 0..0);
        assert_eq!(p.row_range(), None);
    }

    #[test]
    fn page_by_clamps_at_both_ends() {
        let mut p = PaginationState::new(2).with_total_count(5);
        assert!(!p.page_by(-1));
        assert!(p.page_by(10));
        assert_eq!(p.page_index(), 2);
        assert!(p.page_by(-1));
        assert_eq!(p.page_index(), 1);
    }

    #[test]
    fn growing_page_size_keeps_first_row_visible() {
        let mut p = PaginationState::new(3).with_total_count(10);
        p.set_page_index(3);
        assert!(p.set_page_size(5));
        assert_eq!(p.page_count(), 2);
        assert_eq!(p.page_index(), 1);
        assert!(p.visible_range().contains(&9));
    }

    #[test]
    fn shrinking_page_size_keeps_first_row_visible() {
        let mut p = PaginationState::new(20).with_total_count(100);
        p.set_page_index(2);
        p.set_page_size(10);
        assert_eq!(p.page_index(), 4);
        assert_eq!(p.visible_range(), 40..50);
    }

    #[test]
    fn zero_page_size_clamps_to_one() {
        let mut p = PaginationState::new(0);
        assert_eq!(p.page_size(), 1);
        p.set_total_count(3);
        p.set_page_size(0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.page_count(), 3);
    }

    #[test]
    fn shrinking_total_reclamps_index() {
        let mut p = PaginationState::new(10).with_total_count(50);
        p.last_page();
        assert!(p.set_total_count(15));
        assert_eq!(p.page_index(), 1);
        assert!(p.set_total_count(0));
        assert_eq!(p.page_index(), 0);
    }

    #[test]
    fn visible_slice_handles_short_last_page() {
        let rows = [1, 2, 3, 4, 5];
        let mut p = PaginationState::new(2).with_total_count(rows.len());
        p.last_page();
        assert_eq!(p.visible_slice(&rows), &[5]);
        assert_eq!(p.row_range(), Some((5, 5)));
    }
}
