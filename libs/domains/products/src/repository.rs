use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductId, UpdateProduct};

/// Repository trait for Product persistence
///
/// Each method is a single round trip to the store. Absence is reported as
/// `None`/`false`; turning that into an error is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product and return it with its assigned id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// All products in the store's natural order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>>;

    /// Overwrite the supplied fields and return the product after the update
    async fn update(&self, id: ProductId, input: UpdateProduct)
    -> ProductResult<Option<Product>>;

    /// `true` if a product was removed
    async fn delete(&self, id: ProductId) -> ProductResult<bool>;

    /// Remove every product, returning how many were deleted
    async fn delete_all(&self) -> ProductResult<u64>;
}
