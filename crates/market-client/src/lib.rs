use std::fmt;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use market_types::domain::advertisement::{Advertisement, AdvertisementPatch, NewAdvertisement};
use market_types::domain::order::{NewOrder, Order, OrderPatch};
use market_types::ports::market_api::{
    Action, AdvertisementApi, ApiError, ListParams, OrderApi, Operation, Resource,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct MarketClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// HTTP adapter for the marketplace service. Every failure is logged here with
/// the operation and id, then reduced to a user-facing [`ApiError`].
#[derive(Clone)]
pub struct MarketClient {
    base: Url,
    client: reqwest::Client,
}

impl MarketClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<MarketClientBuilder> {
        let mut base = Url::parse(base_url).context("invalid base url")?;
        // `join` drops the last segment unless the base ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(MarketClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    fn endpoint(&self, op: Operation, id: Option<&str>) -> Result<Url, ApiError> {
        let path = match id {
            Some(id) => format!("{}/{id}", op.resource.path()),
            None => op.resource.path().to_string(),
        };
        self.url(&path).map_err(|e| failure(op, id, format_args!("{e:#}")))
    }

    async fn send(
        &self,
        op: Operation,
        id: Option<&str>,
        req: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let res = req.send().await.map_err(|e| failure(op, id, &e))?;
        if op.action == Action::Get && res.status() == StatusCode::NOT_FOUND {
            tracing::warn!(operation = %op, id = id.unwrap_or("-"), "remote record not found");
            return Err(ApiError::not_found(op));
        }
        res.error_for_status().map_err(|e| failure(op, id, &e))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        op: Operation,
        id: Option<&str>,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        let res = self.send(op, id, req).await?;
        res.json::<T>().await.map_err(|e| failure(op, id, &e))
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &ListParams,
    ) -> Result<Vec<T>, ApiError> {
        let op = Operation::new(Action::List, resource);
        let mut req = self.client.get(self.endpoint(op, None)?);
        if !params.is_empty() {
            req = req.query(params);
        }
        let items: Vec<T> = self.fetch(op, None, req).await?;
        tracing::debug!(operation = %op, count = items.len(), "collection fetched");
        Ok(items)
    }

    async fn get<T: DeserializeOwned>(&self, resource: Resource, id: &str) -> Result<T, ApiError> {
        let op = Operation::new(Action::Get, resource);
        let req = self.client.get(self.endpoint(op, Some(id))?);
        self.fetch(op, Some(id), req).await
    }

    async fn create<B: serde::Serialize + Sync>(
        &self,
        resource: Resource,
        body: &B,
    ) -> Result<(), ApiError> {
        let op = Operation::new(Action::Create, resource);
        let req = self.client.post(self.endpoint(op, None)?).json(body);
        self.send(op, None, req).await?;
        Ok(())
    }

    async fn modify<B: serde::Serialize + Sync>(
        &self,
        action: Action,
        resource: Resource,
        id: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let op = Operation::new(action, resource);
        let url = self.endpoint(op, Some(id))?;
        let req = match action {
            Action::Patch => self.client.patch(url),
            _ => self.client.put(url),
        };
        self.send(op, Some(id), req.json(body)).await?;
        Ok(())
    }

    async fn delete(&self, resource: Resource, id: &str) -> Result<(), ApiError> {
        let op = Operation::new(Action::Delete, resource);
        let req = self.client.delete(self.endpoint(op, Some(id))?);
        self.send(op, Some(id), req).await?;
        Ok(())
    }
}

fn failure(op: Operation, id: Option<&str>, err: impl fmt::Display) -> ApiError {
    tracing::error!(
        operation = %op,
        id = id.unwrap_or("-"),
        error = %err,
        "remote call failed"
    );
    ApiError::failed(op)
}

#[async_trait]
impl AdvertisementApi for MarketClient {
    async fn list_advertisements(
        &self,
        params: &ListParams,
    ) -> Result<Vec<Advertisement>, ApiError> {
        self.list(Resource::Advertisement, params).await
    }

    async fn get_advertisement(&self, id: &str) -> Result<Advertisement, ApiError> {
        self.get(Resource::Advertisement, id).await
    }

    async fn create_advertisement(&self, ad: NewAdvertisement) -> Result<(), ApiError> {
        self.create(Resource::Advertisement, &ad).await
    }

    async fn update_advertisement(
        &self,
        id: &str,
        patch: AdvertisementPatch,
    ) -> Result<(), ApiError> {
        self.modify(Action::Update, Resource::Advertisement, id, &patch)
            .await
    }

    async fn patch_advertisement(
        &self,
        id: &str,
        patch: AdvertisementPatch,
    ) -> Result<(), ApiError> {
        self.modify(Action::Patch, Resource::Advertisement, id, &patch)
            .await
    }

    async fn delete_advertisement(&self, id: &str) -> Result<(), ApiError> {
        self.delete(Resource::Advertisement, id).await
    }
}

#[async_trait]
impl OrderApi for MarketClient {
    async fn list_orders(&self, params: &ListParams) -> Result<Vec<Order>, ApiError> {
        self.list(Resource::Order, params).await
    }

    async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        self.get(Resource::Order, id).await
    }

    async fn create_order(&self, order: NewOrder) -> Result<(), ApiError> {
        self.create(Resource::Order, &order).await
    }

    async fn update_order(&self, id: &str, patch: OrderPatch) -> Result<(), ApiError> {
        self.modify(Action::Update, Resource::Order, id, &patch).await
    }

    async fn patch_order(&self, id: &str, patch: OrderPatch) -> Result<(), ApiError> {
        self.modify(Action::Patch, Resource::Order, id, &patch).await
    }

    async fn delete_order(&self, id: &str) -> Result<(), ApiError> {
        self.delete(Resource::Order, id).await
    }
}

impl MarketClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<MarketClient> {
        if let Some(client) = self.client {
            return Ok(MarketClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(MarketClient {
            base: self.base,
            client,
        })
    }
}
