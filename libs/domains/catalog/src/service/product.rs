use std::sync::Arc;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Acknowledgement, CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Products currently for sale
    pub async fn list_active_products(&self) -> CatalogResult<Vec<Product>> {
        self.repository.list_available().await
    }

    /// Create a product in an existing, active category
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Active products of an active category
    pub async fn list_products_by_category(&self, category_id: i32) -> CatalogResult<Vec<Product>> {
        self.repository.list_by_category(category_id).await
    }

    /// Get a visible product.
    ///
    /// Missing, inactive, and inactive-category products are indistinguishable.
    pub async fn get_product(&self, id: i32) -> CatalogResult<Product> {
        self.repository.find_visible(id).await?.ok_or_else(|| {
            tracing::debug!(product_id = id, "Product not visible");
            CatalogError::product_unavailable()
        })
    }

    /// Partially update a product in any state.
    ///
    /// An empty update returns the stored product without writing.
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if input.is_empty() {
            tracing::debug!(product_id = id, "Empty product update, nothing to write");
            return self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| CatalogError::product_not_found(id));
        }

        self.repository.update(id, input).await
    }

    /// Soft-delete an active product
    pub async fn delete_product(&self, id: i32) -> CatalogResult<Acknowledgement> {
        let product = self.repository.deactivate(id).await?;
        Ok(Acknowledgement::success(format!(
            "Product {} deleted",
            product.id
        )))
    }
}
