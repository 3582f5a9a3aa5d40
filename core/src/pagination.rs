//! Client-side paging of ordered lists.
//!
//! Paging never fails: out-of-range indices are clamped to the last page and
//! an empty list still has one (empty) page.

use serde::Serialize;

/// Borrowed view of one page of `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub page_count: usize,
    pub clamped_index: usize,
    pub page_size: usize,
}

/// Owned page, ready to hand to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_count: usize,
    pub clamped_index: usize,
    pub page_size: usize,
}

impl<'a, T> PageView<'a, T> {
    /// Slices `items` into the page at `page_index`.
    ///
    /// A `page_size` of zero is treated as one.
    pub fn paginate(items: &'a [T], page_size: usize, page_index: usize) -> Self {
        let page_size = page_size.max(1);
        let page_count = items.len().div_ceil(page_size).max(1);
        let clamped_index = page_index.min(page_count - 1);
        let start = (clamped_index * page_size).min(items.len());
        let end = (start + page_size).min(items.len());

        Self {
            items: &items[start..end],
            page_count,
            clamped_index,
            page_size,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.clamped_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.clamped_index + 1 < self.page_count
    }
}

impl<T: Clone> PageView<'_, T> {
    pub fn to_page(&self) -> Page<T> {
        Page {
            items: self.items.to_vec(),
            page_count: self.page_count,
            clamped_index: self.clamped_index,
            page_size: self.page_size,
        }
    }
}

/// Convenience wrapper returning an owned page.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_index: usize) -> Page<T> {
    PageView::paginate(items, page_size, page_index).to_page()
}
