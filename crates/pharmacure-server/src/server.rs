use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use pharmacure_store::{CartStore, JsonFileCartStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Pharmacure cart server.
pub struct CartServer {
    config: ServerConfig,
    state: AppState,
}

impl CartServer {
    /// Server persisting the cart to `config.cart_path`.
    pub fn new(config: ServerConfig) -> Self {
        let store = JsonFileCartStore::new(&config.cart_path);
        Self::with_store(config, Arc::new(store))
    }

    /// Server over an arbitrary store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn CartStore>) -> Self {
        Self {
            config,
            state: AppState::new(store),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(&self.config, self.state.clone())
    }

    /// Bind to the configured address and serve until Ctrl+C or SIGTERM.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let addr = listener.local_addr()?;
        info!(
            %addr,
            cart = %self.config.cart_path.display(),
            static_dir = ?self.config.static_dir,
            "pharmacure server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        info!("pharmacure server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacure_store::InMemoryCartStore;

    #[test]
    fn server_construction() {
        let server = CartServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:3000".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = CartServer::with_store(
            ServerConfig::default(),
            Arc::new(InMemoryCartStore::new()),
        );
        let _router = server.router();
    }

    #[tokio::test]
    async fn serve_on_stops_at_shutdown() {
        let server = CartServer::with_store(
            ServerConfig::default(),
            Arc::new(InMemoryCartStore::new()),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        server.serve_on(listener, async {}).await.unwrap();
    }
}
