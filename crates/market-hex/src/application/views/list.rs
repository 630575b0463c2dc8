use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::application::pipeline::{total_pages, Page, Paging};

/// How a list view should be presented right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus<'a> {
    /// First load still in flight.
    Loading,
    /// First load failed: nothing to show but the message.
    Failed(&'a str),
    /// A collection is available; `notice` carries a later fetch failure.
    Ready { notice: Option<&'a str> },
}

/// Collection store plus the paging half of a list view's parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListState<T> {
    items: Vec<T>,
    loaded: bool,
    loading: bool,
    error: Option<String>,
    paging: Paging,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new(Paging::default())
    }
}

impl<T> ListState<T> {
    pub fn new(paging: Paging) -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            loading: false,
            error: None,
            paging,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn paging(&self) -> Paging {
        self.paging
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn status(&self) -> ListStatus<'_> {
        match (&self.error, self.loaded) {
            (_, false) if self.loading => ListStatus::Loading,
            (Some(message), false) => ListStatus::Failed(message),
            (None, false) => ListStatus::Loading,
            (notice, true) => ListStatus::Ready {
                notice: notice.as_deref(),
            },
        }
    }

    pub fn fetch_started(&mut self) {
        self.loading = true;
    }

    /// Wholesale replacement; the page index goes back to 1.
    pub fn fetch_succeeded(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
        self.loading = false;
        self.error = None;
        self.paging.reset();
    }

    /// The previous collection stays as it was.
    pub fn fetch_failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn page_size_changed(&mut self, page_size: NonZeroUsize) {
        self.paging.set_page_size(page_size);
    }

    /// Explicit navigation; ignored unless `page` exists for `matched` items.
    pub fn page_requested(&mut self, page: usize, matched: usize) {
        let total = total_pages(matched, self.paging.page_size());
        if !self.paging.go_to(page, total) {
            tracing::debug!(page, total, "page request out of range ignored");
        }
    }

    pub fn reset_page(&mut self) {
        self.paging.reset();
    }

    pub fn page_of<'a>(&self, derived: Vec<&'a T>) -> Page<'a, T> {
        self.paging.page_of(derived)
    }
}
