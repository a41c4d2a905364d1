//! Database initialization

use std::time::Duration;

use anyhow::Result;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::{error, info};

use crate::Config;

/// Initialize the connection pool for the dashboard database
pub async fn init_database(config: &Config) -> Result<MySqlPool> {
    info!(
        max_connections = config.database.max_connections,
        "Connecting to database"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.database.idle_timeout_seconds))
        .connect(config.database_url())
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            anyhow::anyhow!("Database connection failed: {e}")
        })?;

    info!("Database connected successfully");

    Ok(pool)
}
