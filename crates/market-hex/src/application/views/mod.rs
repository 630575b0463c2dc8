//! Per-page view state. Each view is a plain value advanced by
//! `apply(self, event) -> Self`; what it displays is derived on demand.

pub mod advertisement;
pub mod advertisements;
pub mod form;
pub mod list;
pub mod orders;

pub use advertisement::{AdvertisementEvent, AdvertisementView, DetailState};
pub use advertisements::{AdvertisementsEvent, AdvertisementsView};
pub use form::{AdField, AdvertisementForm};
pub use list::{ListState, ListStatus};
pub use orders::{OrdersEvent, OrdersView};
