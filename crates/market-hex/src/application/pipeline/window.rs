use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of pages needed for `len` items; zero items give zero pages.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// The slice `[(page-1)*size, page*size)` clamped to the input. Page 0 and
/// pages past the end yield an empty slice.
pub fn window<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> &[T] {
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let size = page_size.get();
    let start = index.saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Window parameters of a list view. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    page_size: NonZeroUsize,
    page: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paging {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page_size, page: 1 }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// A new window size invalidates the old index, so this goes back to page 1.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Moves to `page` when it lies in `1..=total_pages`; returns whether it moved.
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        if (1..=total_pages).contains(&page) {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Applies the window to an already filtered and sorted sequence.
    pub fn page_of<'a, T>(&self, derived: Vec<&'a T>) -> Page<'a, T> {
        let total_items = derived.len();
        Page {
            items: window(&derived, self.page_size, self.page).to_vec(),
            number: self.page,
            total_pages: total_pages(total_items, self.page_size),
            total_items,
        }
    }
}

/// One page of a derived view.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    pub number: usize,
    pub total_pages: usize,
    /// Items that passed the predicate, across all pages.
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
