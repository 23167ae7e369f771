//! Upload server lifecycle.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::routes::{self, AppState};
use crate::{MAX_UPLOAD_BYTES, ServerError};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on (0 = OS-assigned).
    pub port: u16,
    /// Directory uploaded files are written into (created if missing).
    pub upload_dir: PathBuf,
}

/// The phone-facing upload server.
pub struct UploadServer {
    config: ServerConfig,
    cancel: CancellationToken,
    local_addr: Mutex<Option<SocketAddr>>,
}

impl UploadServer {
    /// Creates a new server; call [`run`](Self::run) to bind and serve.
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            cancel: CancellationToken::new(),
            local_addr: Mutex::new(None),
        })
    }

    /// Returns the bound address, available once [`run`](Self::run) has bound
    /// the socket.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock().await
    }

    /// Returns the listening port (0 if not yet bound).
    pub async fn port(&self) -> u16 {
        self.local_addr.lock().await.map(|a| a.port()).unwrap_or(0)
    }

    /// Gracefully shuts down the server.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Binds on all interfaces and serves until shutdown.
    pub async fn run(self: &Arc<Self>) -> Result<(), ServerError> {
        tokio::fs::create_dir_all(&self.config.upload_dir).await?;

        let state = Arc::new(AppState {
            upload_dir: self.config.upload_dir.clone(),
        });

        let app = Router::new()
            .route("/", get(routes::index))
            .route("/upload", post(routes::upload))
            .route("/status", get(routes::status))
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .with_state(state);

        let addr: SocketAddr = ([0, 0, 0, 0], self.config.port).into();
        let listener = TcpListener::bind(addr).await?;

        let local_addr = listener.local_addr()?;
        *self.local_addr.lock().await = Some(local_addr);
        tracing::info!(
            %local_addr,
            upload_dir = %self.config.upload_dir.display(),
            "upload server listening"
        );

        let cancel = self.cancel.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("upload server shutting down");
            })
            .await?;

        Ok(())
    }
}
