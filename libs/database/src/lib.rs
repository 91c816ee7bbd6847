//! Relational database connectors for the catalog services
//!
//! Wraps SeaORM connection setup for the two supported engines:
//!
//! - **SQLite** (`sqlite:` URLs) for the embedded, file-backed store
//! - **PostgreSQL** (`postgres:` / `postgresql:` URLs) for the networked store
//!
//! The returned [`sql::DatabaseConnection`] is a pooled handle. It is created
//! once at startup and handed to repositories explicitly; repositories open a
//! transaction per operation on top of it.
//!
//! # Features
//!
//! - `config` (default) - `core_config::FromEnv` support for [`sql::SqlConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::sql;
//! use migration::Migrator;
//!
//! let db = sql::connect("sqlite://ecommerce.db?mode=rwc").await?;
//! sql::run_migrations::<Migrator>(&db, "shop_api").await?;
//! ```

pub mod common;
pub mod sql;

pub use common::{DatabaseError, DatabaseResult};
