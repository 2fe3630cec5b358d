//! Signal handling for graceful shutdown.
//!
//! SIGTERM and SIGINT (Ctrl+C elsewhere) stop the server after in-flight
//! requests finish.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Signal handler that turns process signals into a shutdown notification.
pub struct SignalHandler {
    /// Channel to signal shutdown.
    shutdown_tx: Arc<watch::Sender<bool>>,
    /// Channel to receive shutdown signal.
    shutdown_rx: watch::Receiver<bool>,
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalHandler {
    /// Creates a new signal handler.
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    /// Spawns the signal listener task.
    #[cfg(unix)]
    pub fn spawn_listener(&self) {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_tx = self.shutdown_tx.clone();

        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(error = %e, "Failed to install signal handlers");
                    return;
                }
            };

        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM, initiating shutdown"),
                _ = sigint.recv() => info!("Received SIGINT, initiating shutdown"),
            }
            let _ = shutdown_tx.send(true);
            debug!("Signal listener stopped");
        });
    }

    /// Non-Unix implementation: Ctrl+C only.
    #[cfg(not(unix))]
    pub fn spawn_listener(&self) {
        let shutdown_tx = self.shutdown_tx.clone();

        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("Received Ctrl+C, initiating shutdown");
                let _ = shutdown_tx.send(true);
            }
        });
    }

    /// Returns a future that completes when a shutdown signal is received.
    pub fn shutdown(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.shutdown_rx.clone(),
        }
    }

    /// Programmatically triggers a shutdown.
    pub fn trigger_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// A signal that completes when shutdown is signaled.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Waits for the shutdown signal. Also returns if the handler is dropped.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}
