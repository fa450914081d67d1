use crate::config::AppConfig;
use crate::errors::ServiceError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{error, info};

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// Establishes a connection pool with default pool settings.
pub async fn establish_connection(database_url: &str) -> Result<DbPool, ServiceError> {
    let config = DbConfig {
        url: database_url.to_string(),
        ..Default::default()
    };
    establish_connection_with_config(&config).await
}

/// Establishes a connection pool with custom pool settings.
pub async fn establish_connection_with_config(config: &DbConfig) -> Result<DbPool, ServiceError> {
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(false);

    let pool = Database::connect(opt).await.map_err(|e| {
        error!(url = %config.url, error = %e, "failed to connect to database");
        ServiceError::DatabaseError(e)
    })?;

    info!("Database connection established");
    Ok(pool)
}

/// Establishes a connection pool from the application configuration.
pub async fn establish_connection_from_app_config(cfg: &AppConfig) -> Result<DbPool, ServiceError> {
    let config = DbConfig {
        url: cfg.database_url.clone(),
        max_connections: cfg.db_max_connections,
        min_connections: cfg.db_min_connections,
        ..Default::default()
    };
    establish_connection_with_config(&config).await
}

/// Runs all pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), ServiceError> {
    crate::migrator::Migrator::up(pool, None).await.map_err(|e| {
        error!(error = %e, "failed to run migrations");
        ServiceError::DatabaseError(e)
    })?;
    info!("Database migrations applied");
    Ok(())
}
