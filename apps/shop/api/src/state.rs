//! Application state management.
//!
//! The state holds configuration and the pooled database handle that every
//! catalog repository is built from.

use sea_orm::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection is an `Arc`-backed pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// SQLite or PostgreSQL connection pool
    pub db: DatabaseConnection,
}
