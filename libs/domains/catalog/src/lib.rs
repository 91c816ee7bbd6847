//! Catalog Domain
//!
//! Categories and the products filed under them, with soft deletion and
//! activity-gated visibility.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, no-op updates, NotFound mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access + relationship rules (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, activity state
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers,
//!     repository::InMemoryCatalog,
//!     service::{CategoryService, ProductService},
//! };
//!
//! // One store backs both services
//! let store = InMemoryCatalog::new();
//! let categories = CategoryService::new(store.clone());
//! let products = ProductService::new(store);
//!
//! // Create Axum routers
//! let router = axum::Router::new()
//!     .nest("/categories", handlers::categories::router(categories))
//!     .nest("/products", handlers::products::router(products));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod rules;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use models::{
    Acknowledgement, ActivityState, Category, CreateCategory, CreateProduct, Product,
    UpdateCategory, UpdateProduct,
};
pub use repository::{CategoryRepository, InMemoryCatalog, ProductRepository};
pub use service::{CategoryService, ProductService};
pub use sql::{SqlCategoryRepository, SqlProductRepository};
