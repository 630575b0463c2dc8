use std::fmt;
use std::str::FromStr;

use market_types::domain::advertisement::Advertisement;
use market_types::domain::order::{Order, OrderStatus, ParseStatusError};
use serde::{Deserialize, Serialize};

pub trait Predicate<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Keeps the items the predicate accepts, preserving their relative order.
pub fn retain<'a, T, P>(items: impl IntoIterator<Item = &'a T>, predicate: &P) -> Vec<&'a T>
where
    T: 'a,
    P: Predicate<T> + ?Sized,
{
    items
        .into_iter()
        .filter(|item| predicate.matches(item))
        .collect()
}

/// Case-insensitive substring search over advertisement names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameSearch {
    needle: String,
}

impl NameSearch {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }
}

impl Predicate<Advertisement> for NameSearch {
    fn matches(&self, ad: &Advertisement) -> bool {
        self.needle.is_empty() || ad.name.to_lowercase().contains(&self.needle)
    }
}

/// Exact status match; `None` lets every order through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusFilter(pub Option<OrderStatus>);

impl StatusFilter {
    pub const ANY: StatusFilter = StatusFilter(None);

    pub fn only(status: OrderStatus) -> Self {
        StatusFilter(Some(status))
    }
}

impl Predicate<Order> for StatusFilter {
    fn matches(&self, order: &Order) -> bool {
        match self.0 {
            None => true,
            Some(status) => order.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "any" => Ok(StatusFilter::ANY),
            _ => s.parse().map(StatusFilter::only),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("All statuses"),
            Some(status) => f.write_str(status.label()),
        }
    }
}
