use market_types::domain::advertisement::Advertisement;
use serde::{Deserialize, Serialize};

use crate::application::views::form::{AdField, AdvertisementForm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DetailState {
    Loading,
    Loaded(Advertisement),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvertisementEvent {
    FetchStarted,
    FetchSucceeded(Advertisement),
    FetchFailed(String),
    EditOpened,
    EditClosed,
    EditFieldEdited(AdField, String),
    SaveFailed(String),
    /// The update went through; carries the refetched advertisement.
    Saved(Advertisement),
}

/// Single advertisement page with its edit dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementView {
    id: String,
    state: DetailState,
    edit_form: Option<AdvertisementForm>,
}

impl AdvertisementView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: DetailState::Loading,
            edit_form: None,
        }
    }

    pub fn apply(mut self, event: AdvertisementEvent) -> Self {
        match event {
            AdvertisementEvent::FetchStarted => self.state = DetailState::Loading,
            AdvertisementEvent::FetchSucceeded(ad) | AdvertisementEvent::Saved(ad) => {
                self.edit_form = None;
                self.state = DetailState::Loaded(ad);
            }
            AdvertisementEvent::FetchFailed(message) | AdvertisementEvent::SaveFailed(message) => {
                self.edit_form = None;
                self.state = DetailState::Failed(message);
            }
            AdvertisementEvent::EditOpened => {
                if let DetailState::Loaded(ad) = &self.state {
                    self.edit_form = Some(AdvertisementForm::from_advertisement(ad));
                }
            }
            AdvertisementEvent::EditClosed => self.edit_form = None,
            AdvertisementEvent::EditFieldEdited(field, value) => {
                if let Some(form) = self.edit_form.as_mut() {
                    form.set(field, value);
                }
            }
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn advertisement(&self) -> Option<&Advertisement> {
        match &self.state {
            DetailState::Loaded(ad) => Some(ad),
            _ => None,
        }
    }

    pub fn edit_form(&self) -> Option<&AdvertisementForm> {
        self.edit_form.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bike() -> Advertisement {
        Advertisement {
            id: "7".into(),
            name: "Bike".into(),
            description: "Red".into(),
            price: 5000.0,
            views: 3,
            likes: 1,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn edit_requires_a_loaded_advertisement() {
        let view = AdvertisementView::new("7").apply(AdvertisementEvent::EditOpened);
        assert!(view.edit_form().is_none());

        let view = view
            .apply(AdvertisementEvent::FetchSucceeded(bike()))
            .apply(AdvertisementEvent::EditOpened)
            .apply(AdvertisementEvent::EditFieldEdited(AdField::Price, "4500".into()));
        assert_eq!(view.edit_form().unwrap().price, "4500");
        assert_eq!(view.advertisement().unwrap().price, 5000.0);
    }

    #[test]
    fn failed_save_shows_error_state() {
        let view = AdvertisementView::new("7")
            .apply(AdvertisementEvent::FetchSucceeded(bike()))
            .apply(AdvertisementEvent::EditOpened)
            .apply(AdvertisementEvent::SaveFailed("Could not update".into()));
        assert_eq!(view.state(), &DetailState::Failed("Could not update".into()));
        assert!(view.edit_form().is_none());
    }

    #[test]
    fn saved_replaces_loaded_entity() {
        let mut updated = bike();
        updated.price = 4500.0;
        let view = AdvertisementView::new("7")
            .apply(AdvertisementEvent::FetchSucceeded(bike()))
            .apply(AdvertisementEvent::EditOpened)
            .apply(AdvertisementEvent::Saved(updated));
        assert_eq!(view.advertisement().unwrap().price, 4500.0);
        assert!(view.edit_form().is_none());
    }
}
