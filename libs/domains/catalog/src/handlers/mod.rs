//! Axum routers for the catalog.
//!
//! Each router carries its own OpenAPI document; the binary nests them under
//! `/categories` and `/products`.

pub mod categories;
pub mod products;
