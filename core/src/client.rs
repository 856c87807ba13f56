//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! this layer deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AveragePrice, NewProduct, Product, ProductDeleted, ProductId, ProductSaved};

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_products(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/produtos")
    }

    pub fn build_get_product(&self, id: ProductId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/produtos/{id}"))
    }

    pub fn build_create_product(&self, input: &NewProduct) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/produtos", input)
    }

    pub fn build_update_product(&self, id: ProductId, input: &NewProduct) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/produtos/{id}"), input)
    }

    pub fn build_delete_product(&self, id: ProductId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/produtos/{id}"))
    }

    pub fn build_most_expensive(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/produtos/maior")
    }

    pub fn build_cheapest(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/produtos/menor")
    }

    pub fn build_average_price(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/produtos/media")
    }

    pub fn build_above_average(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/produtos/acima-da-media")
    }

    pub fn build_below_average(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/produtos/abaixo-da-media")
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<ProductSaved, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<ProductSaved, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<ProductDeleted, ApiError> {
        parse_json(response)
    }

    pub fn parse_most_expensive(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(response)
    }

    pub fn parse_cheapest(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(response)
    }

    pub fn parse_average_price(&self, response: HttpResponse) -> Result<AveragePrice, ApiError> {
        parse_json(response)
    }

    pub fn parse_above_average(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        parse_json(response)
    }

    pub fn parse_below_average(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        parse_json(response)
    }

    fn request(&self, method: HttpMethod, route: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{route}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request(&self, method: HttpMethod, route: &str, input: &NewProduct) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{route}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    Ok(serde_json::from_str(&response.body)?)
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = error_detail(&response.body).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

/// The `detail` string of an error body. Non-JSON bodies, missing or empty
/// details and non-string details (validation error lists) yield `None`.
fn error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}
