//! Connection cleanup run during graceful shutdown.

use tracing::{error, info};

/// Close a SeaORM connection pool with logging.
///
/// The pool also closes on drop; closing explicitly waits for checked-out
/// connections to be returned first.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::close_database;
///
/// close_database(db, "catalog").await;
/// ```
pub async fn close_database(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(name, "Database connection closed"),
        Err(e) => error!(name, "Error closing database connection: {}", e),
    }
}
