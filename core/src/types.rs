//! Domain DTOs for the product catalog API.
//!
//! # Design
//! Field names are English on the Rust side and renamed to the backend's wire
//! names (`nome`, `categoria`, `preco`, `mensagem`, ...) through serde. These
//! types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};

/// Server-assigned product identifier.
pub type ProductId = i64;

/// A catalog item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

/// Payload for creating or replacing a product. Same shape as `Product`
/// without the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

/// Confirmation returned by create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSaved {
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "produto")]
    pub product: Product,
}

/// Confirmation returned by delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDeleted {
    #[serde(rename = "mensagem")]
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AveragePrice {
    #[serde(rename = "preco_medio")]
    pub average: f64,
}
