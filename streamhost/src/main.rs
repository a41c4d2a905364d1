mod server;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use streamhost_api::AppState;
use streamhost_core::{
    bootstrap::{init_database, load_config},
    logging,
    repository::{MediaCatalog, MySqlMediaCatalog},
};

use server::StreamHostServer;

#[derive(Parser, Debug)]
#[command(name = "streamhost")]
#[command(about = "Streaming dashboard backend and media content proxy", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(long, env = "STREAMHOST_CONFIG_PATH")]
    config: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load and validate configuration
    let config = load_config(args.config.as_deref())?;
    if args.check_config {
        println!("Configuration OK");
        return Ok(());
    }

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("streamhost starting...");
    info!("Environment: {:?}", config.environment);
    info!("HTTP address: {}", config.http_address());
    info!("Media server hosts: {}", config.media_server.upstream_hosts().join(", "));

    // 3. Initialize database
    let pool = init_database(&config).await?;
    let catalog = Arc::new(MySqlMediaCatalog::new(pool.clone()));
    if let Err(e) = catalog.ping().await {
        error!("Database is not reachable: {}", e);
        pool.close().await;
        return Err(anyhow::anyhow!("Database check failed: {e}"));
    }
    info!("Database connection verified");

    // 4. Build HTTP state
    let config = Arc::new(config);
    let state = AppState::new(config.clone(), catalog)?;

    // 5. Serve until shutdown
    StreamHostServer::new(config, state, pool).start().await
}
