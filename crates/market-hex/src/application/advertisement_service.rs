use market_types::domain::advertisement::{AdvertisementPatch, NewAdvertisement};
use market_types::ports::market_api::{AdvertisementApi, ListParams};

use crate::application::views::{AdvertisementEvent, AdvertisementsEvent};

/// Runs the remote calls behind the advertisement pages. Mutations are
/// followed by a refetch; results come back as view events.
pub struct AdvertisementService<A: AdvertisementApi> {
    api: A,
}

impl<A: AdvertisementApi> AdvertisementService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> AdvertisementsEvent {
        match self.api.list_advertisements(&ListParams::new()).await {
            Ok(ads) => {
                tracing::info!(count = ads.len(), "advertisements loaded");
                AdvertisementsEvent::FetchSucceeded(ads)
            }
            Err(e) => AdvertisementsEvent::FetchFailed(e.into_message()),
        }
    }

    /// Creates, then reloads the list. A failed create keeps the dialog open;
    /// a failed reload after a successful create closes it and reports the
    /// reload failure.
    pub async fn create(&self, ad: NewAdvertisement) -> Vec<AdvertisementsEvent> {
        if let Err(e) = self.api.create_advertisement(ad).await {
            return vec![AdvertisementsEvent::CreateFailed(e.into_message())];
        }
        tracing::info!("advertisement created");
        match self.api.list_advertisements(&ListParams::new()).await {
            Ok(ads) => vec![AdvertisementsEvent::Created(ads)],
            Err(e) => vec![
                AdvertisementsEvent::CreateClosed,
                AdvertisementsEvent::FetchFailed(e.into_message()),
            ],
        }
    }

    pub async fn fetch_one(&self, id: &str) -> AdvertisementEvent {
        match self.api.get_advertisement(id).await {
            Ok(ad) => AdvertisementEvent::FetchSucceeded(ad),
            Err(e) => AdvertisementEvent::FetchFailed(e.into_message()),
        }
    }

    pub async fn save(&self, id: &str, patch: AdvertisementPatch) -> AdvertisementEvent {
        if let Err(e) = self.api.update_advertisement(id, patch).await {
            return AdvertisementEvent::SaveFailed(e.into_message());
        }
        tracing::info!(id, "advertisement updated");
        match self.api.get_advertisement(id).await {
            Ok(ad) => AdvertisementEvent::Saved(ad),
            Err(e) => AdvertisementEvent::SaveFailed(e.into_message()),
        }
    }
}
