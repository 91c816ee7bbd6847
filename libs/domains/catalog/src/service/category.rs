use std::sync::Arc;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Acknowledgement, Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for Category business logic
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a category, optionally under an active parent
    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// List active categories
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_active().await
    }

    /// Partially update an active category.
    ///
    /// An empty update returns the current category without writing.
    pub async fn update_category(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if input.is_empty() {
            tracing::debug!(category_id = id, "Empty category update, nothing to write");
            return self
                .repository
                .find_by_id(id)
                .await?
                .filter(|c| c.is_active)
                .ok_or_else(|| CatalogError::category_not_found(id));
        }

        self.repository.update(id, input).await
    }

    /// Soft-delete an active category
    pub async fn delete_category(&self, id: i32) -> CatalogResult<Acknowledgement> {
        let category = self.repository.deactivate(id).await?;
        Ok(Acknowledgement::success(format!(
            "Category {} deleted",
            category.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCategoryRepository;
    use mockall::predicate::eq;

    fn tools(is_active: bool) -> Category {
        Category {
            id: 1,
            name: "Tools".to_string(),
            parent_id: None,
            is_active,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_name_before_repository() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo.expect_create().never();

        let service = CategoryService::new(mock_repo);
        let result = service
            .create_category(CreateCategory {
                name: String::new(),
                parent_id: None,
            })
            .await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_passes_parent_errors_through() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(CatalogError::parent_not_found()));

        let service = CategoryService::new(mock_repo);
        let result = service
            .create_category(CreateCategory {
                name: "Hand tools".to_string(),
                parent_id: Some(99),
            })
            .await;

        assert!(matches!(
            result,
            Err(CatalogError::Validation(msg)) if msg == "Parent category not found"
        ));
    }

    #[tokio::test]
    async fn test_empty_update_does_not_write() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(tools(true))));
        mock_repo.expect_update().never();

        let service = CategoryService::new(mock_repo);
        let category = service
            .update_category(1, UpdateCategory::default())
            .await
            .unwrap();

        assert_eq!(category, tools(true));
    }

    #[tokio::test]
    async fn test_empty_update_on_inactive_category_is_not_found() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(tools(false))));

        let service = CategoryService::new(mock_repo);
        let result = service.update_category(1, UpdateCategory::default()).await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_acknowledgement() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_deactivate()
            .with(eq(1))
            .returning(|_| Ok(tools(false)));

        let service = CategoryService::new(mock_repo);
        let ack = service.delete_category(1).await.unwrap();

        assert_eq!(ack.status, "success");
        assert_eq!(ack.message, "Category 1 deleted");
    }
}
