//! UI state for the catalog front-end.
//!
//! # Design
//! `CatalogController` owns everything a view needs: the displayed product
//! list, the product being edited (if any), the form fields and one status
//! line. Views call intent-named operations and then render from the
//! accessors; they never mutate the state directly.
//!
//! There are two modes. In create mode the form is blank and `submit_form`
//! creates a product. `select_for_edit` loads a listed product into the form
//! (edit mode) and `submit_form` then updates it. A successful submit or
//! `cancel_edit` returns to create mode.
//!
//! No operation returns an error. Each one catches its own failure, writes a
//! fixed status message for that action and logs the underlying `ApiError`.
//! Operations take `&mut self`, so at most one request per controller is in
//! flight.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::CatalogApi;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{NewProduct, Product, ProductId};

pub const DELETE_PROMPT: &str = "Tem certeza que deseja apagar este produto?";

const LOAD_FAILED: &str = "Erro ao carregar produtos.";
const SAVE_FAILED: &str = "Erro ao salvar produto.";
const DELETE_FAILED: &str = "Erro ao apagar produto.";
const PRODUCT_LOOKUP_FAILED: &str = "Erro ao buscar produto.";
const AVERAGE_FAILED: &str = "Erro ao buscar média.";
const FILTER_FAILED: &str = "Erro ao buscar produtos.";

/// Asks the user to confirm a destructive action.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, prompt: &str) -> bool;
}

/// A fixed answer, for callers that already asked.
#[async_trait]
impl Confirm for bool {
    async fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

/// Editable form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
        }
    }

    pub fn to_payload(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(ProductId),
}

pub struct CatalogController<T> {
    api: CatalogApi<T>,
    products: Vec<Product>,
    editing: Option<Product>,
    form: ProductForm,
    status: String,
}

impl<T: Transport> CatalogController<T> {
    pub fn new(api: CatalogApi<T>) -> Self {
        Self {
            api,
            products: Vec::new(),
            editing: None,
            form: ProductForm::default(),
            status: String::new(),
        }
    }

    pub fn api(&self) -> &CatalogApi<T> {
        &self.api
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn editing(&self) -> Option<&Product> {
        self.editing.as_ref()
    }

    pub fn mode(&self) -> Mode {
        match &self.editing {
            Some(product) => Mode::Edit(product.id),
            None => Mode::Create,
        }
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Field edits made by the view while the user types.
    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Empty until the first action completes.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Reload the full list. The product count is reported only in create
    /// mode so it does not hide edit context.
    pub async fn load_all(&mut self) {
        match self.api.list_products().await {
            Ok(products) => {
                if self.editing.is_none() {
                    self.status = format!("Total de {} produtos carregados.", products.len());
                }
                self.products = products;
            }
            Err(err) => self.fail("load products", LOAD_FAILED, &err),
        }
    }

    /// Create or update from the form, depending on the mode.
    ///
    /// On success the form is cleared, the controller returns to create mode
    /// and the list is refreshed while keeping the confirmation message. On
    /// failure list, form and mode stay as they were.
    pub async fn submit_form(&mut self) {
        let payload = self.form.to_payload();
        let result = match self.editing.as_ref().map(|product| product.id) {
            Some(id) => self
                .api
                .update_product(id, &payload)
                .await
                .map(|saved| saved.message),
            None => self
                .api
                .create_product(&payload)
                .await
                .map(|saved| format!("Produto \"{}\" criado com sucesso!", saved.product.name)),
        };

        match result {
            Ok(message) => {
                self.status = message;
                self.clear_form();
                self.refresh().await;
            }
            Err(err) => self.fail("save product", SAVE_FAILED, &err),
        }
    }

    /// Enter edit mode for a listed product. Returns `false` and changes
    /// nothing when `id` is not in the displayed list.
    pub fn select_for_edit(&mut self, id: ProductId) -> bool {
        let Some(product) = self.products.iter().find(|product| product.id == id) else {
            return false;
        };
        self.form = ProductForm::from_product(product);
        self.editing = Some(product.clone());
        true
    }

    /// Leave edit mode, discarding the form.
    pub fn cancel_edit(&mut self) {
        self.clear_form();
    }

    /// Delete a product once `confirm` agrees. A declined prompt issues no
    /// request. After a confirmed delete the list is refreshed whether or not
    /// the delete succeeded.
    pub async fn remove<C: Confirm + ?Sized>(&mut self, id: ProductId, confirm: &mut C) {
        if !confirm.confirm(DELETE_PROMPT).await {
            debug!(id, "delete declined");
            return;
        }
        match self.api.delete_product(id).await {
            Ok(deleted) => self.status = deleted.message,
            Err(err) => self.fail("delete product", DELETE_FAILED, &err),
        }
        self.refresh().await;
    }

    pub async fn most_expensive(&mut self) {
        match self.api.most_expensive().await {
            Ok(product) => self.status = format!("Mais caro: {} (R$ {})", product.name, product.price),
            Err(err) => self.fail("most expensive", PRODUCT_LOOKUP_FAILED, &err),
        }
    }

    pub async fn cheapest(&mut self) {
        match self.api.cheapest().await {
            Ok(product) => self.status = format!("Mais barato: {} (R$ {})", product.name, product.price),
            Err(err) => self.fail("cheapest", PRODUCT_LOOKUP_FAILED, &err),
        }
    }

    pub async fn average(&mut self) {
        match self.api.average_price().await {
            Ok(avg) => self.status = format!("Preço médio: R$ {}", avg.average),
            Err(err) => self.fail("average price", AVERAGE_FAILED, &err),
        }
    }

    /// Show only products priced at or above the average.
    pub async fn above_average(&mut self) {
        match self.api.above_average().await {
            Ok(products) => {
                self.status = format!("Produtos acima da média: {}", products.len());
                self.products = products;
            }
            Err(err) => self.fail("above average", FILTER_FAILED, &err),
        }
    }

    /// Show only products priced below the average.
    pub async fn below_average(&mut self) {
        match self.api.below_average().await {
            Ok(products) => {
                self.status = format!("Produtos abaixo da média: {}", products.len());
                self.products = products;
            }
            Err(err) => self.fail("below average", FILTER_FAILED, &err),
        }
    }

    /// Replace the list without touching the status unless the load fails.
    async fn refresh(&mut self) {
        match self.api.list_products().await {
            Ok(products) => self.products = products,
            Err(err) => self.fail("refresh products", LOAD_FAILED, &err),
        }
    }

    fn clear_form(&mut self) {
        self.form = ProductForm::default();
        self.editing = None;
    }

    fn fail(&mut self, action: &str, status: &str, err: &ApiError) {
        warn!(action, error = %err, "catalog action failed");
        self.status = status.to_string();
    }
}
