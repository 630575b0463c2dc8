use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::advertisement::{Advertisement, AdvertisementPatch, NewAdvertisement};
use crate::domain::order::{NewOrder, Order, OrderPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Advertisement,
    Order,
}

impl Resource {
    /// Collection path segment on the remote service.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Advertisement => "advertisements",
            Resource::Order => "orders",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            Resource::Advertisement => "advertisement",
            Resource::Order => "order",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Get,
    Create,
    Update,
    Patch,
    Delete,
}

/// One remote call, used to name it in logs and to pick its user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub action: Action,
    pub resource: Resource,
}

impl Operation {
    pub const fn new(action: Action, resource: Resource) -> Self {
        Self { action, resource }
    }

    pub fn failure_message(self) -> String {
        let noun = self.resource.singular();
        match self.action {
            Action::List => format!(
                "Could not load {}. Please try again later.",
                self.resource.path()
            ),
            Action::Get => format!("Could not load the {noun}. Please try again later."),
            Action::Create => format!("Could not create the {noun}. Please try again later."),
            Action::Update | Action::Patch => {
                format!("Could not update the {noun}. Please try again later.")
            }
            Action::Delete => format!("Could not delete the {noun}. Please try again later."),
        }
    }

    pub fn not_found_message(self) -> String {
        match self.resource {
            Resource::Advertisement => "Advertisement not found".to_string(),
            Resource::Order => "Order not found".to_string(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            Action::List => "list",
            Action::Get => "get",
            Action::Create => "create",
            Action::Update => "update",
            Action::Patch => "patch",
            Action::Delete => "delete",
        };
        match self.action {
            Action::List => write!(f, "{verb} {}", self.resource.path()),
            _ => write!(f, "{verb} {}", self.resource.singular()),
        }
    }
}

/// Failure of a remote call as the UI sees it: only a user-facing message.
/// The developer diagnostic is logged where the error is produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Failed { message: String },
}

impl ApiError {
    pub fn not_found(op: Operation) -> Self {
        ApiError::NotFound {
            message: op.not_found_message(),
        }
    }

    pub fn failed(op: Operation) -> Self {
        ApiError::Failed {
            message: op.failure_message(),
        }
    }

    pub fn user_message(&self) -> &str {
        match self {
            ApiError::NotFound { message } | ApiError::Failed { message } => message,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            ApiError::NotFound { message } | ApiError::Failed { message } => message,
        }
    }
}

/// Opaque query parameters passed through to a collection fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ListParams(BTreeMap<String, String>);

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[async_trait]
pub trait AdvertisementApi: Send + Sync + 'static {
    async fn list_advertisements(&self, params: &ListParams)
        -> Result<Vec<Advertisement>, ApiError>;
    async fn get_advertisement(&self, id: &str) -> Result<Advertisement, ApiError>;
    async fn create_advertisement(&self, ad: NewAdvertisement) -> Result<(), ApiError>;
    async fn update_advertisement(
        &self,
        id: &str,
        patch: AdvertisementPatch,
    ) -> Result<(), ApiError>;
    async fn patch_advertisement(
        &self,
        id: &str,
        patch: AdvertisementPatch,
    ) -> Result<(), ApiError>;
    async fn delete_advertisement(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
pub trait OrderApi: Send + Sync + 'static {
    async fn list_orders(&self, params: &ListParams) -> Result<Vec<Order>, ApiError>;
    async fn get_order(&self, id: &str) -> Result<Order, ApiError>;
    async fn create_order(&self, order: NewOrder) -> Result<(), ApiError>;
    async fn update_order(&self, id: &str, patch: OrderPatch) -> Result<(), ApiError>;
    async fn patch_order(&self, id: &str, patch: OrderPatch) -> Result<(), ApiError>;
    async fn delete_order(&self, id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_differs_from_generic_failure() {
        let op = Operation::new(Action::Get, Resource::Advertisement);
        let missing = ApiError::not_found(op);
        let broken = ApiError::failed(op);
        assert_eq!(missing.user_message(), "Advertisement not found");
        assert_eq!(
            broken.user_message(),
            "Could not load the advertisement. Please try again later."
        );
        assert_ne!(missing, broken);
    }

    #[test]
    fn messages_name_the_resource() {
        let list = Operation::new(Action::List, Resource::Order);
        assert_eq!(
            list.failure_message(),
            "Could not load orders. Please try again later."
        );
        let delete = Operation::new(Action::Delete, Resource::Order);
        assert_eq!(
            delete.failure_message(),
            "Could not delete the order. Please try again later."
        );
        assert_eq!(delete.to_string(), "delete order");
        assert_eq!(list.to_string(), "list orders");
    }

    #[test]
    fn list_params_serialize_as_flat_map() {
        let params = ListParams::new().with("status", "1").with("q", "desk");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({ "q": "desk", "status": "1" }));
        assert_eq!(params.iter().count(), 2);
    }
}
