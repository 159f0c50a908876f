//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductId, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service
///
/// Validates input before anything reaches the store, so an invalid request
/// never causes a write. Each operation then makes exactly one repository call.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Apply a partial update. An empty patch still refreshes `updated_at`.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(&self, id: ProductId, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn lamp_input() -> CreateProduct {
        CreateProduct {
            name: "Desk lamp".to_string(),
            description: "Adjustable LED lamp".to_string(),
            price: 29.9,
        }
    }

    #[tokio::test]
    async fn test_create_product_persists_valid_input() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(repo);
        let product = service.create_product(lamp_input()).await.unwrap();

        assert_eq!(product.name, "Desk lamp");
        assert_eq!(product.price, 29.9);
    }

    #[tokio::test]
    async fn test_create_product_invalid_input_never_reaches_store() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let service = ProductService::new(repo);
        let input = CreateProduct {
            description: String::new(),
            ..lamp_input()
        };

        let err = service.create_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(ref msg) if msg.contains("description")));
    }

    #[tokio::test]
    async fn test_get_product_missing_is_not_found() {
        let id = ProductId::new();
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let err = service.get_product(id).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_list_products_passes_through_store_order() {
        let first = Product::new(lamp_input());
        let second = Product::new(CreateProduct {
            name: "Chair".to_string(),
            ..lamp_input()
        });
        let expected = vec![first.clone(), second.clone()];

        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .times(1)
            .returning(move || Ok(vec![first.clone(), second.clone()]));

        let service = ProductService::new(repo);
        assert_eq!(service.list_products().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_update_product_returns_updated() {
        let mut existing = Product::new(lamp_input());
        let id = existing.id;
        let patch = UpdateProduct {
            name: Some("newName".to_string()),
            ..Default::default()
        };

        let mut repo = MockProductRepository::new();
        repo.expect_update()
            .with(eq(id), eq(patch.clone()))
            .times(1)
            .returning(move |_, input| {
                existing.apply_update(input);
                Ok(Some(existing.clone()))
            });

        let service = ProductService::new(repo);
        let updated = service.update_product(id, patch).await.unwrap();

        assert_eq!(updated.name, "newName");
        assert_eq!(updated.description, "Adjustable LED lamp");
    }

    #[tokio::test]
    async fn test_update_product_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().times(1).returning(|_, _| Ok(None));

        let service = ProductService::new(repo);
        let err = service
            .update_product(ProductId::new(), UpdateProduct::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_product_rejects_empty_name() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let patch = UpdateProduct {
            name: Some(String::new()),
            ..Default::default()
        };

        let err = service
            .update_product(ProductId::new(), patch)
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_product_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = ProductService::new(repo);
        let err = service.delete_product(ProductId::new()).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|| Err(ProductError::Database("server selection timeout".into())));

        let service = ProductService::new(repo);
        assert!(matches!(
            service.list_products().await,
            Err(ProductError::Database(_))
        ));
    }
}
