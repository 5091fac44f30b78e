//! Chat server runner
//!
//! Binds the listener and serves the router until a shutdown signal.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api::{create_router, AppState};

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that stop the server
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// A bound, not yet running, chat server
pub struct ChatServer {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl ChatServer {
    /// Bind to `addr`. Port 0 picks a free port.
    pub async fn bind(addr: SocketAddr, state: Arc<AppState>) -> ServerResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> ServerResult<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves
    pub async fn run_until<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(self.state);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        log::info!("Server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
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
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Backend;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let state = Arc::new(AppState::new(Backend::unavailable()));
        let server = ChatServer::bind("127.0.0.1:0".parse().unwrap(), state)
            .await
            .unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let state = Arc::new(AppState::new(Backend::unavailable()));
        let result = ChatServer::bind(addr, state).await;
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }

    #[tokio::test]
    async fn test_run_until_stops() {
        let state = Arc::new(AppState::new(Backend::unavailable()));
        let server = ChatServer::bind("127.0.0.1:0".parse().unwrap(), state)
            .await
            .unwrap();

        server.run_until(async {}).await.unwrap();
    }
}
