use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The entity is absent or hidden by activity rules
    #[error("{0}")]
    NotFound(String),

    /// The request violates a relationship or field rule
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn parent_not_found() -> Self {
        Self::Validation("Parent category not found".to_string())
    }

    pub fn self_parent() -> Self {
        Self::Validation("Category cannot be its own parent".to_string())
    }

    pub fn parent_cycle() -> Self {
        Self::Validation("Category cannot be nested under its own descendant".to_string())
    }

    pub fn category_not_found(id: i32) -> Self {
        Self::NotFound(format!("Category with id {} not found", id))
    }

    pub fn category_inactive(name: &str) -> Self {
        Self::Validation(format!("Category '{}' is inactive", name))
    }

    /// Category lookup that filters on activity; missing and inactive collapse.
    pub fn category_unavailable() -> Self {
        Self::NotFound("Category not found or inactive".to_string())
    }

    pub fn product_not_found(id: i32) -> Self {
        Self::NotFound(format!("Product with id {} not found", id))
    }

    /// Product lookup through the visibility join; the three causes collapse.
    pub fn product_unavailable() -> Self {
        Self::NotFound("Product not found, inactive, or its category is inactive".to_string())
    }
}

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
