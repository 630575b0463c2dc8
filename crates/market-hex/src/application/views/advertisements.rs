use std::num::NonZeroUsize;

use market_types::domain::advertisement::Advertisement;
use serde::{Deserialize, Serialize};

use crate::application::pipeline::{retain, NameSearch, Page, Paging};
use crate::application::views::form::{AdField, AdvertisementForm};
use crate::application::views::list::{ListState, ListStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum AdvertisementsEvent {
    FetchStarted,
    FetchSucceeded(Vec<Advertisement>),
    FetchFailed(String),
    SearchChanged(String),
    PageSizeChanged(NonZeroUsize),
    PageRequested(usize),
    CreateOpened,
    CreateClosed,
    CreateFieldEdited(AdField, String),
    CreateFailed(String),
    /// The create call went through; carries the refetched collection.
    Created(Vec<Advertisement>),
}

/// Advertisement list page: name search, paging and the "new advertisement" dialog.
/// Advertisements are shown in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementsView {
    list: ListState<Advertisement>,
    search: String,
    create_form: Option<AdvertisementForm>,
}

impl AdvertisementsView {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            list: ListState::new(Paging::new(page_size)),
            ..Self::default()
        }
    }

    pub fn apply(mut self, event: AdvertisementsEvent) -> Self {
        match event {
            AdvertisementsEvent::FetchStarted => self.list.fetch_started(),
            AdvertisementsEvent::FetchSucceeded(items) => self.list.fetch_succeeded(items),
            AdvertisementsEvent::FetchFailed(message) => self.list.fetch_failed(message),
            AdvertisementsEvent::SearchChanged(term) => {
                if term != self.search {
                    self.search = term;
                    self.list.reset_page();
                }
            }
            AdvertisementsEvent::PageSizeChanged(size) => self.list.page_size_changed(size),
            AdvertisementsEvent::PageRequested(page) => {
                let matched = self.matching().len();
                self.list.page_requested(page, matched);
            }
            AdvertisementsEvent::CreateOpened => {
                self.create_form = Some(AdvertisementForm::blank());
            }
            AdvertisementsEvent::CreateClosed => self.create_form = None,
            AdvertisementsEvent::CreateFieldEdited(field, value) => {
                if let Some(form) = self.create_form.as_mut() {
                    form.set(field, value);
                }
            }
            AdvertisementsEvent::CreateFailed(message) => {
                if let Some(form) = self.create_form.as_mut() {
                    form.error = Some(message);
                }
            }
            AdvertisementsEvent::Created(items) => {
                self.create_form = None;
                self.list.fetch_succeeded(items);
            }
        }
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn paging(&self) -> Paging {
        self.list.paging()
    }

    pub fn status(&self) -> ListStatus<'_> {
        self.list.status()
    }

    pub fn collection(&self) -> &[Advertisement] {
        self.list.items()
    }

    pub fn create_form(&self) -> Option<&AdvertisementForm> {
        self.create_form.as_ref()
    }

    fn matching(&self) -> Vec<&Advertisement> {
        retain(self.list.items(), &NameSearch::new(&self.search))
    }

    /// The displayed page, recomputed from the full collection.
    pub fn page(&self) -> Page<'_, Advertisement> {
        self.list.page_of(self.matching())
    }
}
