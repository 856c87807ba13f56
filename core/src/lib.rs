//! API client and UI state for the product catalog service.
//!
//! # Overview
//! `CatalogClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern).
//! `CatalogApi` pairs it with a `Transport` to offer one async call per REST
//! route, and `CatalogController` drives those calls from user actions while
//! owning the list, form and status message a view renders.
//!
//! # Design
//! - `CatalogClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and `Transport` is the only seam that does I/O.
//! - Every failure surfaces as `ApiError`; the controller turns each one
//!   into a fixed status message instead of propagating it.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::CatalogApi;
pub use client::CatalogClient;
pub use config::ClientConfig;
pub use controller::{CatalogController, Confirm, Mode, ProductForm};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{AveragePrice, NewProduct, Product, ProductDeleted, ProductId, ProductSaved};
