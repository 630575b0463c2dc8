use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use market_types::domain::advertisement::{Advertisement, AdvertisementPatch, NewAdvertisement};
use market_types::domain::order::{NewOrder, Order, OrderPatch};
use market_types::ports::market_api::{
    Action, AdvertisementApi, ApiError, ListParams, OrderApi, Operation, Resource,
};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone)]
struct Entry<T> {
    seq: u64,
    value: T,
}

/// Both resources held in process. Listing follows insertion order, the way
/// a JSON-file backed service returns its records.
#[derive(Clone)]
pub struct InMemoryMarket {
    advertisements: Arc<DashMap<String, Entry<Advertisement>>>,
    orders: Arc<DashMap<String, Entry<Order>>>,
    next_seq: Arc<AtomicU64>,
    available: Arc<AtomicBool>,
}

impl InMemoryMarket {
    pub fn new() -> Self {
        Self {
            advertisements: Arc::new(DashMap::new()),
            orders: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Stores a fully formed advertisement under its own id.
    pub fn seed_advertisement(&self, ad: Advertisement) {
        let seq = self.next_seq();
        self.advertisements
            .insert(ad.id.clone(), Entry { seq, value: ad });
    }

    pub fn seed_order(&self, order: Order) {
        let seq = self.next_seq();
        self.orders
            .insert(order.id.clone(), Entry { seq, value: order });
    }

    /// While unavailable every call fails the way a dropped connection would.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn advertisement_count(&self) -> usize {
        self.advertisements.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    fn check(&self, op: Operation) -> Result<(), ApiError> {
        if self.available.load(Ordering::SeqCst) {
            return Ok(());
        }
        tracing::warn!(operation = %op, "in-memory market is unavailable");
        Err(ApiError::failed(op))
    }
}

impl Default for InMemoryMarket {
    fn default() -> Self {
        Self::new()
    }
}

fn list_of<T: Clone + Serialize>(
    map: &DashMap<String, Entry<T>>,
    params: &ListParams,
) -> Vec<T> {
    let mut entries: Vec<Entry<T>> = map
        .iter()
        .map(|kv| kv.value().clone())
        .filter(|entry| matches_params(&entry.value, params))
        .collect();
    entries.sort_by_key(|entry| entry.seq);
    entries.into_iter().map(|entry| entry.value).collect()
}

/// Field equality over the JSON form of the entity; every parameter must match.
fn matches_params<T: Serialize>(value: &T, params: &ListParams) -> bool {
    if params.is_empty() {
        return true;
    }
    let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(value) else {
        return false;
    };
    params.iter().all(|(key, wanted)| match fields.get(key) {
        Some(serde_json::Value::String(s)) => s == wanted,
        Some(other) => other.to_string() == wanted,
        None => false,
    })
}

fn missing(op: Operation, id: &str) -> ApiError {
    tracing::warn!(operation = %op, id, "no record with this id");
    match op.action {
        Action::Get => ApiError::not_found(op),
        _ => ApiError::failed(op),
    }
}

#[async_trait]
impl AdvertisementApi for InMemoryMarket {
    async fn list_advertisements(
        &self,
        params: &ListParams,
    ) -> Result<Vec<Advertisement>, ApiError> {
        self.check(Operation::new(Action::List, Resource::Advertisement))?;
        Ok(list_of(&self.advertisements, params))
    }

    async fn get_advertisement(&self, id: &str) -> Result<Advertisement, ApiError> {
        let op = Operation::new(Action::Get, Resource::Advertisement);
        self.check(op)?;
        self.advertisements
            .get(id)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| missing(op, id))
    }

    async fn create_advertisement(&self, ad: NewAdvertisement) -> Result<(), ApiError> {
        self.check(Operation::new(Action::Create, Resource::Advertisement))?;
        let ad = ad.into_advertisement(Uuid::new_v4().to_string(), Utc::now());
        self.seed_advertisement(ad);
        Ok(())
    }

    async fn update_advertisement(
        &self,
        id: &str,
        patch: AdvertisementPatch,
    ) -> Result<(), ApiError> {
        let op = Operation::new(Action::Update, Resource::Advertisement);
        self.check(op)?;
        let mut entry = self.advertisements.get_mut(id).ok_or_else(|| missing(op, id))?;
        entry.value.apply_patch(patch);
        Ok(())
    }

    async fn patch_advertisement(
        &self,
        id: &str,
        patch: AdvertisementPatch,
    ) -> Result<(), ApiError> {
        let op = Operation::new(Action::Patch, Resource::Advertisement);
        self.check(op)?;
        let mut entry = self.advertisements.get_mut(id).ok_or_else(|| missing(op, id))?;
        entry.value.apply_patch(patch);
        Ok(())
    }

    async fn delete_advertisement(&self, id: &str) -> Result<(), ApiError> {
        let op = Operation::new(Action::Delete, Resource::Advertisement);
        self.check(op)?;
        self.advertisements
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| missing(op, id))
    }
}

#[async_trait]
impl OrderApi for InMemoryMarket {
    async fn list_orders(&self, params: &ListParams) -> Result<Vec<Order>, ApiError> {
        self.check(Operation::new(Action::List, Resource::Order))?;
        Ok(list_of(&self.orders, params))
    }

    async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        let op = Operation::new(Action::Get, Resource::Order);
        self.check(op)?;
        self.orders
            .get(id)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| missing(op, id))
    }

    async fn create_order(&self, order: NewOrder) -> Result<(), ApiError> {
        self.check(Operation::new(Action::Create, Resource::Order))?;
        let order = order.into_order(Uuid::new_v4().to_string(), Utc::now());
        self.seed_order(order);
        Ok(())
    }

    async fn update_order(&self, id: &str, patch: OrderPatch) -> Result<(), ApiError> {
        let op = Operation::new(Action::Update, Resource::Order);
        self.check(op)?;
        let mut entry = self.orders.get_mut(id).ok_or_else(|| missing(op, id))?;
        entry.value.apply_patch(patch);
        Ok(())
    }

    async fn patch_order(&self, id: &str, patch: OrderPatch) -> Result<(), ApiError> {
        let op = Operation::new(Action::Patch, Resource::Order);
        self.check(op)?;
        let mut entry = self.orders.get_mut(id).ok_or_else(|| missing(op, id))?;
        entry.value.apply_patch(patch);
        Ok(())
    }

    async fn delete_order(&self, id: &str) -> Result<(), ApiError> {
        let op = Operation::new(Action::Delete, Resource::Order);
        self.check(op)?;
        self.orders
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| missing(op, id))
    }
}
