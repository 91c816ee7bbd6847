use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateCategory, CreateProduct, Product, UpdateCategory, UpdateProduct,
};
use crate::rules;

/// Repository trait for Category persistence
///
/// Relationship checks and the write they guard run atomically inside each
/// implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert an active category; the parent, if any, must be active
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category>;

    /// All active categories ordered by id
    async fn list_active(&self) -> CatalogResult<Vec<Category>>;

    /// Get a category by ID regardless of state
    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Category>>;

    /// Apply a partial update to an active category
    async fn update(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category>;

    /// Flip an active category to inactive
    async fn deactivate(&self, id: i32) -> CatalogResult<Category>;
}

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Active, in-stock products whose category is active, ordered by id
    async fn list_available(&self) -> CatalogResult<Vec<Product>>;

    /// Insert an active product into an existing, active category
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product>;

    /// Active products of an active category
    async fn list_by_category(&self, category_id: i32) -> CatalogResult<Vec<Product>>;

    /// Product that is active and whose category is active
    async fn find_visible(&self, id: i32) -> CatalogResult<Option<Product>>;

    /// Get a product by ID regardless of state
    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Product>>;

    /// Apply a partial update; the resulting category must be active
    async fn update(&self, id: i32, input: UpdateProduct) -> CatalogResult<Product>;

    /// Flip an active product to inactive
    async fn deactivate(&self, id: i32) -> CatalogResult<Product>;
}

#[derive(Debug, Default)]
struct CatalogState {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

/// In-memory implementation of both repositories (for development/testing)
///
/// Clones share the same store, so one instance can back both services.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let mut state = self.state.write().await;

        if let Some(parent_id) = input.parent_id {
            rules::check_parent(state.categories.get(&parent_id))?;
        }

        state.next_category_id += 1;
        let category = Category {
            id: state.next_category_id,
            name: input.name,
            parent_id: input.parent_id,
            is_active: true,
        };
        state.categories.insert(category.id, category.clone());

        tracing::info!(category_id = category.id, "Created category");
        Ok(category)
    }

    async fn list_active(&self) -> CatalogResult<Vec<Category>> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .values()
            .filter(|c| c.is_active)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn update(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category> {
        let mut state = self.state.write().await;

        if !state.categories.get(&id).is_some_and(|c| c.is_active) {
            return Err(CatalogError::category_not_found(id));
        }

        if let Some(parent_id) = input.parent_id {
            if parent_id == id {
                return Err(CatalogError::self_parent());
            }
            rules::check_parent(state.categories.get(&parent_id))?;

            let mut ancestors = Vec::new();
            let mut next = state.categories.get(&parent_id).and_then(|p| p.parent_id);
            while let Some(ancestor_id) = next {
                if ancestors.contains(&ancestor_id) {
                    break;
                }
                ancestors.push(ancestor_id);
                if ancestor_id == id {
                    break;
                }
                next = state.categories.get(&ancestor_id).and_then(|c| c.parent_id);
            }
            rules::check_ancestors(id, &ancestors)?;
        }

        let category = state
            .categories
            .get_mut(&id)
            .ok_or_else(|| CatalogError::category_not_found(id))?;
        if let Some(name) = input.name {
            category.name = name;
        }
        if let Some(parent_id) = input.parent_id {
            category.parent_id = Some(parent_id);
        }

        tracing::info!(category_id = id, "Updated category");
        Ok(category.clone())
    }

    async fn deactivate(&self, id: i32) -> CatalogResult<Category> {
        let mut state = self.state.write().await;

        let category = state
            .categories
            .get_mut(&id)
            .ok_or_else(|| CatalogError::category_not_found(id))?;
        let next = category
            .state()
            .deactivate()
            .ok_or_else(|| CatalogError::category_not_found(id))?;
        category.is_active = next.is_active();

        tracing::info!(category_id = id, "Deactivated category");
        Ok(category.clone())
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn list_available(&self) -> CatalogResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|p| {
                state
                    .categories
                    .get(&p.category_id)
                    .is_some_and(|c| p.is_available(c))
            })
            .cloned()
            .collect())
    }

    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let mut state = self.state.write().await;

        rules::check_category_for_create(
            input.category_id,
            state.categories.get(&input.category_id),
        )?;

        state.next_product_id += 1;
        let product = Product {
            id: state.next_product_id,
            name: input.name,
            description: input.description,
            price: input.price,
            image_url: input.image_url,
            stock: input.stock,
            category_id: input.category_id,
            is_active: true,
        };
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn list_by_category(&self, category_id: i32) -> CatalogResult<Vec<Product>> {
        let state = self.state.read().await;

        if !state
            .categories
            .get(&category_id)
            .is_some_and(|c| c.is_active)
        {
            return Err(CatalogError::category_unavailable());
        }

        Ok(state
            .products
            .values()
            .filter(|p| p.category_id == category_id && p.is_active)
            .cloned()
            .collect())
    }

    async fn find_visible(&self, id: i32) -> CatalogResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .get(&id)
            .filter(|p| {
                p.is_active
                    && state
                        .categories
                        .get(&p.category_id)
                        .is_some_and(|c| c.is_active)
            })
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> CatalogResult<Product> {
        let mut state = self.state.write().await;

        let current_category = state
            .products
            .get(&id)
            .ok_or_else(|| CatalogError::product_not_found(id))?
            .category_id;
        let category_id = input.category_id.unwrap_or(current_category);
        rules::check_category_for_update(category_id, state.categories.get(&category_id))?;

        let product = state
            .products
            .get_mut(&id)
            .ok_or_else(|| CatalogError::product_not_found(id))?;
        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(description) = input.description {
            product.description = description;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(image_url) = input.image_url {
            product.image_url = image_url;
        }
        if let Some(stock) = input.stock {
            product.stock = stock;
        }
        product.category_id = category_id;

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn deactivate(&self, id: i32) -> CatalogResult<Product> {
        let mut state = self.state.write().await;

        let product = state
            .products
            .get_mut(&id)
            .ok_or_else(|| CatalogError::product_not_found(id))?;
        let next = product
            .state()
            .deactivate()
            .ok_or_else(|| CatalogError::product_not_found(id))?;
        product.is_active = next.is_active();

        tracing::info!(product_id = id, "Deactivated product");
        Ok(product.clone())
    }
}
