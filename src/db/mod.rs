use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Open the connection pool
pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))?;

    tracing::debug!(max_connections = config.db_max_connections, "Database pool ready");
    Ok(db)
}
