use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductDraft, ProductPatch};
use crate::product_actor::ProductError;

/// Client for interacting with the Product actor.
///
/// The form calls [`add_product`](Self::add_product); the grid commits each edited
/// row through [`edit_product`](Self::edit_product) or
/// [`update_product`](Self::update_product) and reverts the row on `Err`.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, draft), fields(reference = %draft.reference))]
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.create(draft).await?)
    }

    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn update_product(&self, product: Product) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(product).await?)
    }

    /// Applies a grid edit to the stored row and submits the result as an update.
    #[instrument(skip(self))]
    pub async fn edit_product(&self, id: u64, patch: ProductPatch) -> Result<Product, ProductError> {
        let current = self
            .get_product(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;
        if patch.is_empty() {
            debug!("Empty patch, submitting row unchanged");
        }
        self.update_product(current.patched(patch)).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: u64) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    /// Watch handle yielding the catalog after every successful add or update.
    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.inner.subscribe()
    }
}
