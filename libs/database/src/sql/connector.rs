use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::SqlConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Connect to the database behind `database_url` with engine defaults.
///
/// # Example
/// ```ignore
/// use database::sql::connect;
///
/// let db = connect("sqlite://ecommerce.db?mode=rwc").await?;
/// ```
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DatabaseError> {
    connect_from_config(SqlConfig::new(database_url)?).await
}

/// Connect using a [`SqlConfig`].
pub async fn connect_from_config(config: SqlConfig) -> Result<DatabaseConnection, DatabaseError> {
    let engine = config.engine;
    let db = connect_with_options(config.into_connect_options()).await?;
    info!(%engine, "Connected to database");
    Ok(db)
}

/// Connect with custom connection options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    Database::connect(options).await
}

/// Connect from config, retrying with backoff while the server comes up.
///
/// # Example
/// ```ignore
/// use database::sql::{SqlConfig, connect_from_config_with_retry};
/// use database::common::RetryConfig;
///
/// let config = SqlConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, RetryConfig::new().with_max_retries(10)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: SqlConfig,
    retry_config: RetryConfig,
) -> Result<DatabaseConnection, DatabaseError> {
    let engine = config.engine;
    let options = config.into_connect_options();

    let db = retry_with_backoff(|| connect_with_options(options.clone()), retry_config).await?;
    info!(%engine, "Connected to database");
    Ok(db)
}

/// Apply the schema owned by `M` to `db`.
///
/// # Example
/// ```ignore
/// use migration::Migrator;
/// use database::sql::run_migrations;
///
/// run_migrations::<Migrator>(&db, "shop_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DatabaseError> {
    info!(app = app_name, "Applying database schema");
    M::up(db, None).await?;
    info!(app = app_name, "Database schema is up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory_sqlite() {
        let db = connect("sqlite::memory:").await.unwrap();
        db.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let err = connect("mysql://localhost/shop").await.unwrap_err();
        assert!(matches!(err, DatabaseError::ConfigError(_)));
    }
}
