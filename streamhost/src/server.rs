//! Server lifecycle management
//!
//! Starts the HTTP server and tears everything down on SIGTERM or Ctrl+C.

use std::sync::Arc;
use std::time::Duration;

use sqlx::MySqlPool;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use streamhost_api::{create_router, AppState};
use streamhost_core::Config;

/// Long-running video responses get this long to finish after a shutdown signal
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

pub struct StreamHostServer {
    config: Arc<Config>,
    state: AppState,
    pool: MySqlPool,
}

impl StreamHostServer {
    pub const fn new(config: Arc<Config>, state: AppState, pool: MySqlPool) -> Self {
        Self { config, state, pool }
    }

    /// Start the HTTP server and wait for a shutdown signal
    pub async fn start(self) -> anyhow::Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut http_handle = self.start_http_server(shutdown_rx).await?;

        let shutdown_requested = tokio::select! {
            _ = &mut http_handle => {
                error!("HTTP server stopped unexpectedly");
                false
            }
            () = shutdown_signal() => {
                info!("Shutdown signal received, starting graceful shutdown...");
                true
            }
        };

        if shutdown_requested {
            let _ = shutdown_tx.send(true);
            match tokio::time::timeout(DRAIN_TIMEOUT, http_handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("HTTP server task failed: {}", e),
                Err(_) => warn!(
                    "Drain timeout reached with requests still in flight, proceeding with shutdown"
                ),
            }
        }

        info!("Closing database pool...");
        self.pool.close().await;
        info!("streamhost stopped");

        Ok(())
    }

    /// Bind the listener up front so a taken port fails startup
    async fn start_http_server(
        &self,
        shutdown_rx: watch::Receiver<bool>,
    ) -> anyhow::Result<JoinHandle<()>> {
        let http_address = self.config.http_address();
        let listener = tokio::net::TcpListener::bind(&http_address)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind HTTP address {http_address}: {e}"))?;
        let http_router = create_router(self.state.clone());

        info!("HTTP server listening on {}", http_address);

        let handle = tokio::spawn(async move {
            let mut rx = shutdown_rx;
            let graceful = async move {
                let _ = rx.changed().await;
            };

            if let Err(e) = axum::serve(listener, http_router)
                .with_graceful_shutdown(graceful)
                .await
            {
                error!("HTTP server error: {}", e);
            }

            info!("HTTP server shut down gracefully");
        });

        Ok(handle)
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("Received Ctrl+C"); }
        () = terminate => { info!("Received SIGTERM"); }
    }
}
