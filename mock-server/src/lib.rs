use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

/// Body of a successful create or update.
#[derive(Serialize, Deserialize)]
pub struct Saved {
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "produto")]
    pub product: Product,
}

/// In-memory product table. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct Catalog {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

impl Catalog {
    pub fn insert(&mut self, input: NewProduct) -> Product {
        self.last_id += 1;
        let product = Product {
            id: self.last_id,
            name: input.name,
            category: input.category,
            price: input.price,
        };
        self.products.insert(product.id, product.clone());
        product
    }

    fn mean(&self) -> Option<f64> {
        if self.products.is_empty() {
            return None;
        }
        let total: f64 = self.products.values().map(|p| p.price).sum();
        Some(total / self.products.len() as f64)
    }

    fn filtered(&self, keep: impl Fn(f64, f64) -> bool) -> Vec<Product> {
        let Some(mean) = self.mean() else {
            return Vec::new();
        };
        self.products
            .values()
            .filter(|p| keep(p.price, mean))
            .cloned()
            .collect()
    }

    /// First product (lowest id) for which `better(candidate, current)` never
    /// held against an earlier one.
    fn extreme(&self, better: impl Fn(f64, f64) -> bool) -> Option<Product> {
        self.products
            .values()
            .fold(None::<&Product>, |best, p| match best {
                Some(b) if !better(p.price, b.price) => Some(b),
                _ => Some(p),
            })
            .cloned()
    }
}

pub type Db = Arc<RwLock<Catalog>>;

/// Error body in the backend's `{"detail": ...}` shape.
pub struct Detail(StatusCode, String);

impl Detail {
    fn not_found(id: i64) -> Self {
        Detail(StatusCode::NOT_FOUND, format!("Produto id:{id}, não encontrado"))
    }

    fn empty_catalog() -> Self {
        Detail(StatusCode::NOT_FOUND, "Nenhum produto cadastrado".to_string())
    }
}

impl IntoResponse for Detail {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "detail": self.1 }))).into_response()
    }
}

pub fn app() -> Router {
    router(Db::default())
}

/// A router whose catalog already holds `products`, in order.
pub fn app_with(products: impl IntoIterator<Item = NewProduct>) -> Router {
    let mut catalog = Catalog::default();
    for product in products {
        catalog.insert(product);
    }
    router(Arc::new(RwLock::new(catalog)))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/produtos", get(list_products).post(create_product))
        .route("/produtos/maior", get(most_expensive))
        .route("/produtos/menor", get(cheapest))
        .route("/produtos/media", get(average_price))
        .route("/produtos/acima-da-media", get(above_average))
        .route("/produtos/abaixo-da-media", get(below_average))
        .route(
            "/produtos/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let catalog = db.read().await;
    Json(catalog.products.values().cloned().collect())
}

async fn create_product(State(db): State<Db>, Json(input): Json<NewProduct>) -> Json<Saved> {
    let product = db.write().await.insert(input);
    info!(id = product.id, "product created");
    Json(Saved {
        message: "Produto cadastrado com sucesso".to_string(),
        product,
    })
}

async fn get_product(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Product>, Detail> {
    let catalog = db.read().await;
    catalog
        .products
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Detail::not_found(id))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<NewProduct>,
) -> Result<Json<Saved>, Detail> {
    let mut catalog = db.write().await;
    let product = catalog.products.get_mut(&id).ok_or_else(|| Detail::not_found(id))?;
    product.name = input.name;
    product.category = input.category;
    product.price = input.price;
    info!(id, "product updated");
    Ok(Json(Saved {
        message: format!("Produto {id} atualizado com sucesso!"),
        product: product.clone(),
    }))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, Detail> {
    let mut catalog = db.write().await;
    catalog.products.remove(&id).ok_or_else(|| Detail::not_found(id))?;
    info!(id, "product deleted");
    Ok(Json(json!({ "mensagem": format!("Produto com {id} apagado com sucesso!") })))
}

async fn most_expensive(State(db): State<Db>) -> Result<Json<Product>, Detail> {
    let catalog = db.read().await;
    catalog.extreme(|a, b| a > b).map(Json).ok_or_else(Detail::empty_catalog)
}

async fn cheapest(State(db): State<Db>) -> Result<Json<Product>, Detail> {
    let catalog = db.read().await;
    catalog.extreme(|a, b| a < b).map(Json).ok_or_else(Detail::empty_catalog)
}

async fn average_price(State(db): State<Db>) -> Result<Json<serde_json::Value>, Detail> {
    let catalog = db.read().await;
    let mean = catalog.mean().ok_or_else(Detail::empty_catalog)?;
    let rounded = (mean * 100.0).round() / 100.0;
    Ok(Json(json!({ "preco_medio": rounded })))
}

async fn above_average(State(db): State<Db>) -> Json<Vec<Product>> {
    Json(db.read().await.filtered(|price, mean| price >= mean))
}

async fn below_average(State(db): State<Db>) -> Json<Vec<Product>> {
    Json(db.read().await.filtered(|price, mean| price < mean))
}
