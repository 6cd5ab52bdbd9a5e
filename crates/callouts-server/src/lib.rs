//! HTTP + WebSocket server for the interruption diagram

pub mod router;
pub mod handlers;
pub mod websocket;
pub mod assets;

use std::sync::Arc;

use anyhow::Context;
use callouts_core::{ColumnLayout, Config, DiagramController, RecordStore, Summary};

/// Where the server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 7890,
        }
    }
}

/// State shared by every request and connection. Read-only after startup.
pub struct ServerState {
    pub store: Arc<RecordStore>,
    pub config: Arc<Config>,
    /// Computed once at startup.
    pub summary: Summary,
}

impl ServerState {
    pub fn new(store: RecordStore, config: Config) -> Self {
        let summary = Summary::from_store(&store);
        ServerState {
            store: Arc::new(store),
            config: Arc::new(config),
            summary,
        }
    }

    /// A fresh diagram context for one client.
    pub fn controller(&self) -> DiagramController {
        DiagramController::new(
            Arc::clone(&self.store),
            ColumnLayout,
            self.config.layout.params(),
        )
    }
}

pub struct CalloutsServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl CalloutsServer {
    pub fn new(store: RecordStore, config: Config, server_config: ServerConfig) -> Self {
        CalloutsServer {
            state: Arc::new(ServerState::new(store, config)),
            config: server_config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        tracing::info!("Listening on http://{}", listener.local_addr()?);
        let app = router::create_router(self.state);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
