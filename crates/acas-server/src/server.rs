use std::sync::Arc;

use acas_dispatch::Dispatcher;
use acas_ledger::{WalConfig, WalLedger};
use acas_store::FsBlobStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// ACAS server: a dispatcher over durable backends, exposed over HTTP.
pub struct AcasServer {
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
}

impl AcasServer {
    /// Open the blob collection and ledger log under `config.data_dir`.
    pub fn open(config: ServerConfig) -> ServerResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let store = FsBlobStore::open(&config.data_dir, &config.collection)?;
        let ledger = WalLedger::open(
            &config.ledger_path(),
            WalConfig {
                sync_mode: config.ledger_sync,
            },
        )?;
        let dispatcher = Dispatcher::new(Arc::new(store), Arc::new(ledger));
        Ok(Self::with_dispatcher(config, Arc::new(dispatcher)))
    }

    /// Serve an existing dispatcher (useful for testing).
    pub fn with_dispatcher(config: ServerConfig, dispatcher: Arc<Dispatcher>) -> Self {
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn router(&self) -> axum::Router {
        build_router(
            AppState {
                dispatcher: Arc::clone(&self.dispatcher),
            },
            self.config.max_request_size,
        )
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            data_dir = %self.config.data_dir.display(),
            "ACAS server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
