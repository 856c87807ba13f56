//! Asynchronous facade over `CatalogClient` and a `Transport`.
//!
//! Every method is build → execute → parse. Failures of any kind come back
//! as `ApiError`; nothing is retried.

use tracing::debug;

use crate::client::CatalogClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{AveragePrice, NewProduct, Product, ProductDeleted, ProductId, ProductSaved};

pub struct CatalogApi<T> {
    client: CatalogClient,
    transport: T,
}

impl CatalogApi<ReqwestTransport> {
    /// Connect to the backend described by `config` over reqwest.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(CatalogClient::new(&config.base_url), transport))
    }
}

impl<T: Transport> CatalogApi<T> {
    pub fn new(client: CatalogClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.send(self.client.build_list_products()).await?;
        self.client.parse_list_products(response)
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let response = self.send(self.client.build_get_product(id)).await?;
        self.client.parse_get_product(response)
    }

    pub async fn create_product(&self, input: &NewProduct) -> Result<ProductSaved, ApiError> {
        let response = self.send(self.client.build_create_product(input)?).await?;
        self.client.parse_create_product(response)
    }

    pub async fn update_product(&self, id: ProductId, input: &NewProduct) -> Result<ProductSaved, ApiError> {
        let response = self.send(self.client.build_update_product(id, input)?).await?;
        self.client.parse_update_product(response)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<ProductDeleted, ApiError> {
        let response = self.send(self.client.build_delete_product(id)).await?;
        self.client.parse_delete_product(response)
    }

    pub async fn most_expensive(&self) -> Result<Product, ApiError> {
        let response = self.send(self.client.build_most_expensive()).await?;
        self.client.parse_most_expensive(response)
    }

    pub async fn cheapest(&self) -> Result<Product, ApiError> {
        let response = self.send(self.client.build_cheapest()).await?;
        self.client.parse_cheapest(response)
    }

    pub async fn average_price(&self) -> Result<AveragePrice, ApiError> {
        let response = self.send(self.client.build_average_price()).await?;
        self.client.parse_average_price(response)
    }

    pub async fn above_average(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.send(self.client.build_above_average()).await?;
        self.client.parse_above_average(response)
    }

    pub async fn below_average(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.send(self.client.build_below_average()).await?;
        self.client.parse_below_average(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.execute(request).await?;
        debug!(%method, %path, status = response.status, "catalog request completed");
        Ok(response)
    }
}
