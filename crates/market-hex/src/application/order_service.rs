use market_types::ports::market_api::{ListParams, OrderApi};

use crate::application::views::OrdersEvent;

/// Runs the remote calls behind the orders page and reports each completion
/// as exactly one view event.
pub struct OrderService<A: OrderApi> {
    api: A,
}

impl<A: OrderApi> OrderService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn fetch_orders(&self) -> OrdersEvent {
        match self.api.list_orders(&ListParams::new()).await {
            Ok(orders) => {
                tracing::info!(count = orders.len(), "orders loaded");
                OrdersEvent::FetchSucceeded(orders)
            }
            Err(e) => OrdersEvent::FetchFailed(e.into_message()),
        }
    }
}
