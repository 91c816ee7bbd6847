//! SeaORM-backed repositories.
//!
//! Reads go straight to the pool. Every write opens a transaction on the
//! injected connection, runs its relationship checks and the write inside
//! it, and commits; any early return drops the transaction, which rolls back.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};

use crate::entity::{category, product};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateCategory, CreateProduct, Product, UpdateCategory, UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::rules;

#[derive(Clone)]
pub struct SqlCategoryRepository {
    db: DatabaseConnection,
}

impl SqlCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SqlCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let txn = self.db.begin().await?;

        if let Some(parent_id) = input.parent_id {
            let parent = category::Entity::find_by_id(parent_id)
                .one(&txn)
                .await?
                .map(Category::from);
            rules::check_parent(parent.as_ref())?;
        }

        let model = category::ActiveModel {
            name: Set(input.name),
            parent_id: Set(input.parent_id),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(category_id = model.id, "Created category");
        Ok(model.into())
    }

    async fn list_active(&self) -> CatalogResult<Vec<Category>> {
        let models = category::Entity::find()
            .filter(category::Column::IsActive.eq(true))
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Category>> {
        let model = category::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Category::from))
    }

    async fn update(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category> {
        let txn = self.db.begin().await?;

        let model = category::Entity::find_by_id(id)
            .filter(category::Column::IsActive.eq(true))
            .one(&txn)
            .await?
            .ok_or_else(|| CatalogError::category_not_found(id))?;

        if let Some(parent_id) = input.parent_id {
            if parent_id == id {
                return Err(CatalogError::self_parent());
            }
            let parent = category::Entity::find_by_id(parent_id)
                .one(&txn)
                .await?
                .map(Category::from);
            rules::check_parent(parent.as_ref())?;

            let mut ancestors = Vec::new();
            let mut next = parent.and_then(|p| p.parent_id);
            while let Some(ancestor_id) = next {
                if ancestors.contains(&ancestor_id) {
                    break;
                }
                ancestors.push(ancestor_id);
                if ancestor_id == id {
                    break;
                }
                next = category::Entity::find_by_id(ancestor_id)
                    .one(&txn)
                    .await?
                    .and_then(|m| m.parent_id);
            }
            rules::check_ancestors(id, &ancestors)?;
        }

        let mut active = model.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(parent_id) = input.parent_id {
            active.parent_id = Set(Some(parent_id));
        }
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(category_id = id, "Updated category");
        Ok(updated.into())
    }

    async fn deactivate(&self, id: i32) -> CatalogResult<Category> {
        let txn = self.db.begin().await?;

        let model = category::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CatalogError::category_not_found(id))?;
        let next = Category::from(model.clone())
            .state()
            .deactivate()
            .ok_or_else(|| CatalogError::category_not_found(id))?;

        let mut active = model.into_active_model();
        active.is_active = Set(next.is_active());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(category_id = id, "Deactivated category");
        Ok(updated.into())
    }
}

#[derive(Clone)]
pub struct SqlProductRepository {
    db: DatabaseConnection,
}

impl SqlProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn list_available(&self) -> CatalogResult<Vec<Product>> {
        let models = product::Entity::find()
            .inner_join(category::Entity)
            .filter(product::Column::IsActive.eq(true))
            .filter(category::Column::IsActive.eq(true))
            .filter(product::Column::Stock.gt(0))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let txn = self.db.begin().await?;

        let category = category::Entity::find_by_id(input.category_id)
            .one(&txn)
            .await?
            .map(Category::from);
        rules::check_category_for_create(input.category_id, category.as_ref())?;

        let model = product::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            image_url: Set(input.image_url),
            stock: Set(input.stock),
            category_id: Set(input.category_id),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(
            product_id = model.id,
            category_id = model.category_id,
            "Created product"
        );
        Ok(model.into())
    }

    async fn list_by_category(&self, category_id: i32) -> CatalogResult<Vec<Product>> {
        let exists = category::Entity::find_by_id(category_id)
            .filter(category::Column::IsActive.eq(true))
            .select_only()
            .column(category::Column::Id)
            .into_tuple::<i32>()
            .one(&self.db)
            .await?
            .is_some();
        if !exists {
            return Err(CatalogError::category_unavailable());
        }

        let models = product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .filter(product::Column::IsActive.eq(true))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_visible(&self, id: i32) -> CatalogResult<Option<Product>> {
        let model = product::Entity::find_by_id(id)
            .inner_join(category::Entity)
            .filter(product::Column::IsActive.eq(true))
            .filter(category::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;

        Ok(model.map(Product::from))
    }

    async fn find_by_id(&self, id: i32) -> CatalogResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> CatalogResult<Product> {
        let txn = self.db.begin().await?;

        let model = product::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(id))?;

        let category_id = input.category_id.unwrap_or(model.category_id);
        let category = category::Entity::find_by_id(category_id)
            .one(&txn)
            .await?
            .map(Category::from);
        rules::check_category_for_update(category_id, category.as_ref())?;

        let mut active = model.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(stock) = input.stock {
            active.stock = Set(stock);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn deactivate(&self, id: i32) -> CatalogResult<Product> {
        let txn = self.db.begin().await?;

        let model = product::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(id))?;
        let next = Product::from(model.clone())
            .state()
            .deactivate()
            .ok_or_else(|| CatalogError::product_not_found(id))?;

        let mut active = model.into_active_model();
        active.is_active = Set(next.is_active());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(product_id = id, "Deactivated product");
        Ok(updated.into())
    }
}
