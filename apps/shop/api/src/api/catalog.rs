use axum::Router;
use domain_catalog::{
    handlers, CategoryService, ProductService, SqlCategoryRepository, SqlProductRepository,
};

pub fn categories_router(state: &crate::state::AppState) -> Router {
    let repository = SqlCategoryRepository::new(state.db.clone());
    let service = CategoryService::new(repository);
    handlers::categories::router(service)
}

pub fn products_router(state: &crate::state::AppState) -> Router {
    let repository = SqlProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    handlers::products::router(service)
}
