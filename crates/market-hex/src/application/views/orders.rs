use std::num::NonZeroUsize;

use market_types::domain::order::Order;
use serde::{Deserialize, Serialize};

use crate::application::pipeline::{retain, sort_orders, OrderSortKey, Page, Paging, StatusFilter};
use crate::application::views::list::{ListState, ListStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum OrdersEvent {
    FetchStarted,
    FetchSucceeded(Vec<Order>),
    FetchFailed(String),
    StatusFilterChanged(StatusFilter),
    SortChanged(OrderSortKey),
    PageSizeChanged(NonZeroUsize),
    PageRequested(usize),
    ItemsShown(String),
    ItemsClosed,
}

/// Orders page: status filter, sort key, paging and the "items of an order" dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersView {
    list: ListState<Order>,
    status_filter: StatusFilter,
    sort: OrderSortKey,
    items_of: Option<String>,
}

impl OrdersView {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            list: ListState::new(Paging::new(page_size)),
            ..Self::default()
        }
    }

    pub fn apply(mut self, event: OrdersEvent) -> Self {
        match event {
            OrdersEvent::FetchStarted => self.list.fetch_started(),
            OrdersEvent::FetchSucceeded(items) => {
                self.list.fetch_succeeded(items);
                if let Some(id) = &self.items_of {
                    if !self.list.items().iter().any(|o| &o.id == id) {
                        self.items_of = None;
                    }
                }
            }
            OrdersEvent::FetchFailed(message) => self.list.fetch_failed(message),
            OrdersEvent::StatusFilterChanged(filter) => {
                if filter != self.status_filter {
                    self.status_filter = filter;
                    self.list.reset_page();
                }
            }
            // Reordering keeps membership, so the page index stays.
            OrdersEvent::SortChanged(key) => self.sort = key,
            OrdersEvent::PageSizeChanged(size) => self.list.page_size_changed(size),
            OrdersEvent::PageRequested(page) => {
                let matched = self.matching().len();
                self.list.page_requested(page, matched);
            }
            OrdersEvent::ItemsShown(id) => {
                if self.list.items().iter().any(|o| o.id == id) {
                    self.items_of = Some(id);
                } else {
                    tracing::debug!(order_id = %id, "no such order on this page");
                }
            }
            OrdersEvent::ItemsClosed => self.items_of = None,
        }
        self
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn sort_key(&self) -> OrderSortKey {
        self.sort
    }

    pub fn paging(&self) -> Paging {
        self.list.paging()
    }

    pub fn status(&self) -> ListStatus<'_> {
        self.list.status()
    }

    pub fn collection(&self) -> &[Order] {
        self.list.items()
    }

    /// Order whose items dialog is open.
    pub fn items_dialog(&self) -> Option<&Order> {
        let id = self.items_of.as_ref()?;
        self.list.items().iter().find(|o| &o.id == id)
    }

    fn matching(&self) -> Vec<&Order> {
        retain(self.list.items(), &self.status_filter)
    }

    /// Filter, then stable sort, then window.
    pub fn page(&self) -> Page<'_, Order> {
        self.list.page_of(sort_orders(self.matching(), self.sort))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use market_types::domain::order::OrderStatus;

    fn order(id: &str, status: OrderStatus, total: f64, hours: i64) -> Order {
        Order {
            id: id.into(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() + Duration::hours(hours),
            finished_at: None,
            items: vec![],
            delivery_way: "pickup".into(),
            total,
        }
    }

    fn page_ids(view: &OrdersView) -> Vec<String> {
        view.page().items.iter().map(|o| o.id.clone()).collect()
    }

    fn sample() -> Vec<Order> {
        vec![
            order("1", OrderStatus::Created, 300.0, 4),
            order("2", OrderStatus::Paid, 100.0, 3),
            order("3", OrderStatus::Received, 200.0, 2),
            order("4", OrderStatus::Paid, 50.0, 1),
        ]
    }

    #[test]
    fn default_sort_is_creation_date() {
        let view = OrdersView::default().apply(OrdersEvent::FetchSucceeded(sample()));
        assert_eq!(page_ids(&view), ["4", "3", "2", "1"]);
    }

    #[test]
    fn filter_by_paid_keeps_two() {
        let view = OrdersView::default()
            .apply(OrdersEvent::FetchSucceeded(sample()))
            .apply(OrdersEvent::StatusFilterChanged(StatusFilter::only(OrderStatus::Paid)))
            .apply(OrdersEvent::SortChanged(OrderSortKey::Total));
        assert_eq!(page_ids(&view), ["4", "2"]);

        let view = view.apply(OrdersEvent::StatusFilterChanged(StatusFilter::ANY));
        assert_eq!(page_ids(&view), ["4", "2", "3", "1"]);
    }

    #[test]
    fn sort_change_keeps_page_but_filter_change_resets_it() {
        let size = NonZeroUsize::new(1).unwrap();
        let view = OrdersView::new(size)
            .apply(OrdersEvent::FetchSucceeded(sample()))
            .apply(OrdersEvent::PageRequested(3));
        assert_eq!(view.paging().page(), 3);

        let view = view.apply(OrdersEvent::SortChanged(OrderSortKey::Total));
        assert_eq!(view.paging().page(), 3);
        assert_eq!(page_ids(&view), ["3"]);

        let view = view.apply(OrdersEvent::StatusFilterChanged(StatusFilter::only(
            OrderStatus::Paid,
        )));
        assert_eq!(view.paging().page(), 1);
    }

    #[test]
    fn items_dialog_tracks_existing_orders() {
        let view = OrdersView::default()
            .apply(OrdersEvent::FetchSucceeded(sample()))
            .apply(OrdersEvent::ItemsShown("missing".into()));
        assert!(view.items_dialog().is_none());

        let view = view.apply(OrdersEvent::ItemsShown("3".into()));
        assert_eq!(view.items_dialog().map(|o| o.id.as_str()), Some("3"));

        let view = view.apply(OrdersEvent::FetchSucceeded(vec![order(
            "9",
            OrderStatus::Paid,
            1.0,
            0,
        )]));
        assert!(view.items_dialog().is_none());
    }

    #[test]
    fn source_collection_order_is_untouched() {
        let view = OrdersView::default()
            .apply(OrdersEvent::FetchSucceeded(sample()))
            .apply(OrdersEvent::SortChanged(OrderSortKey::Total));
        let _ = view.page();
        let stored: Vec<_> = view.collection().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(stored, ["1", "2", "3", "4"]);
    }
}
