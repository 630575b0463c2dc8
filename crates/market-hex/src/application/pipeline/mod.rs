//! Derivation of what a list view displays: predicate, then comparator, then
//! window. Each stage borrows from the collection and never mutates it.

pub mod filter;
pub mod sort;
pub mod window;

pub use filter::{retain, NameSearch, Predicate, StatusFilter};
pub use sort::{sort_orders, OrderSortKey};
pub use window::{total_pages, window, Page, Paging};
