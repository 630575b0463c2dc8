use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use market_types::domain::order::Order;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderSortKey {
    #[default]
    CreatedAt,
    Total,
}

impl OrderSortKey {
    pub fn compare(self, a: &Order, b: &Order) -> Ordering {
        match self {
            OrderSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            OrderSortKey::Total => a.total.total_cmp(&b.total),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderSortKey::CreatedAt => "By creation date",
            OrderSortKey::Total => "By total",
        }
    }
}

impl fmt::Display for OrderSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" | "created-at" | "createdat" | "date" => Ok(OrderSortKey::CreatedAt),
            "total" | "sum" => Ok(OrderSortKey::Total),
            other => Err(format!("unknown sort key: {other} (expected `created` or `total`)")),
        }
    }
}

/// Ascending, stable: orders with equal keys keep their incoming order.
/// Only the vector of references is reordered.
pub fn sort_orders(mut orders: Vec<&Order>, key: OrderSortKey) -> Vec<&Order> {
    orders.sort_by(|a, b| key.compare(a, b));
    orders
}
