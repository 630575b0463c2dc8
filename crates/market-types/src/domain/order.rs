use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order workflow status. Travels over the wire as an integer code; codes
/// outside the known range are kept as `Unknown` instead of failing to decode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "i64", into = "i64")]
pub enum OrderStatus {
    Created,
    Paid,
    Transport,
    DeliveredToThePoint,
    Received,
    Archived,
    Refund,
    Unknown(i64),
}

impl OrderStatus {
    /// Known statuses in workflow order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Created,
        OrderStatus::Paid,
        OrderStatus::Transport,
        OrderStatus::DeliveredToThePoint,
        OrderStatus::Received,
        OrderStatus::Archived,
        OrderStatus::Refund,
    ];

    pub fn code(self) -> i64 {
        match self {
            OrderStatus::Created => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Transport => 2,
            OrderStatus::DeliveredToThePoint => 3,
            OrderStatus::Received => 4,
            OrderStatus::Archived => 5,
            OrderStatus::Refund => 6,
            OrderStatus::Unknown(code) => code,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Paid => "Paid",
            OrderStatus::Transport => "In transit",
            OrderStatus::DeliveredToThePoint => "Delivered to pickup point",
            OrderStatus::Received => "Received",
            OrderStatus::Archived => "Archived",
            OrderStatus::Refund => "Refund",
            OrderStatus::Unknown(_) => "Unknown status",
        }
    }

    /// Command-line spelling, e.g. `delivered-to-the-point`.
    pub fn slug(self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Paid => "paid",
            OrderStatus::Transport => "transport",
            OrderStatus::DeliveredToThePoint => "delivered-to-the-point",
            OrderStatus::Received => "received",
            OrderStatus::Archived => "archived",
            OrderStatus::Refund => "refund",
            OrderStatus::Unknown(_) => "unknown",
        }
    }
}

impl From<i64> for OrderStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => OrderStatus::Created,
            1 => OrderStatus::Paid,
            2 => OrderStatus::Transport,
            3 => OrderStatus::DeliveredToThePoint,
            4 => OrderStatus::Received,
            5 => OrderStatus::Archived,
            6 => OrderStatus::Refund,
            other => OrderStatus::Unknown(other),
        }
    }
}

impl From<OrderStatus> for i64 {
    fn from(status: OrderStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    /// Accepts a numeric code or a variant name in any case, with `-`/`_` ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(code) = raw.parse::<i64>() {
            return Ok(OrderStatus::from(code));
        }
        let wanted: String = raw
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.slug().replace('-', "") == wanted)
            .ok_or_else(|| ParseStatusError(raw.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Id of the advertisement this line refers to.
    pub id: String,
    pub name: String,
    pub price: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub delivery_way: String,
    pub total: f64,
}

impl Order {
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|it| u64::from(it.count)).sum()
    }

    /// Sum of price × count. Informational only: `total` is whatever the
    /// server reports and is never checked against this.
    pub fn items_total(&self) -> f64 {
        self.items
            .iter()
            .map(|it| it.price * f64::from(it.count))
            .sum()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn can_be_completed(&self) -> bool {
        self.status == OrderStatus::Received && !self.is_finished()
    }

    pub fn apply_patch(&mut self, patch: OrderPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(finished_at) = patch.finished_at {
            self.finished_at = Some(finished_at);
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(delivery_way) = patch.delivery_way {
            self.delivery_way = delivery_way;
        }
        if let Some(total) = patch.total {
            self.total = total;
        }
    }
}

/// Create payload: identity and creation time are assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderItem>,
    pub delivery_way: String,
    pub total: f64,
}

impl NewOrder {
    pub fn into_order(self, id: String, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            status: self.status,
            created_at,
            finished_at: self.finished_at,
            items: self.items,
            delivery_way: self.delivery_way,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_way: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}
