//! TCP listener for the HTTP endpoint.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{AppState, router_with_state};
use crate::signals::ShutdownSignal;

/// HTTP server bound to its listen address.
pub struct HttpServer {
    /// Server configuration.
    config: ServerConfig,
    /// TCP listener.
    listener: TcpListener,
    /// Handler state.
    state: AppState,
}

impl HttpServer {
    /// Binds the listen address from the configuration.
    pub async fn bind(config: ServerConfig) -> ServerResult<Self> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|e| ServerError::bind(config.bind_addr, e))?;

        Ok(Self {
            config,
            listener,
            state: AppState::default(),
        })
    }

    /// Builder: replace the handler state.
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = state;
        self
    }

    /// Returns the address actually bound (useful with port 0).
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until `shutdown` completes.
    pub async fn run(self, shutdown: ShutdownSignal) -> ServerResult<()> {
        let addr = self.local_addr()?;
        let app = router_with_state(&self.config, self.state);

        info!(
            addr = %addr,
            max_body_bytes = self.config.max_body_bytes,
            "HTTP server listening"
        );

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
