//! Batch slicing: split `[0, total)` into contiguous fixed-size windows.

use std::ops::Range;

/// A contiguous run of source pages, 0-indexed and half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRange {
    pub start: usize,
    pub end: usize,
}

impl BatchRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Global page offset of the batch's first page.
    pub fn offset(&self) -> usize {
        self.start
    }

    /// 1-indexed number of the batch's first page.
    pub fn first_page(&self) -> usize {
        self.start + 1
    }

    /// 1-indexed number of the batch's last page.
    pub fn last_page(&self) -> usize {
        self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Lazy iterator over the batches of a document.
#[derive(Debug, Clone)]
pub struct Batches {
    next: usize,
    total: usize,
    size: usize,
}

impl Iterator for Batches {
    type Item = BatchRange;

    fn next(&mut self) -> Option<BatchRange> {
        if self.next >= self.total {
            return None;
        }
        let start = self.next;
        let end = start.saturating_add(self.size).min(self.total);
        self.next = end;
        Some(BatchRange { start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = batch_count(self.total - self.next.min(self.total), self.size);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Batches {}

/// Split `total_pages` into batches of at most `batch_size` pages.
///
/// `batch_size` must be ≥ 1; the config builder rejects zero.
pub fn batches(total_pages: usize, batch_size: usize) -> Batches {
    debug_assert!(batch_size > 0, "batch size must be positive");
    Batches {
        next: 0,
        total: total_pages,
        size: batch_size.max(1),
    }
}

/// Number of batches `batches(total_pages, batch_size)` yields.
pub fn batch_count(total_pages: usize, batch_size: usize) -> usize {
    total_pages.div_ceil(batch_size.max(1))
}
