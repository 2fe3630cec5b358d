//! Foreground HTTP endpoint.

use std::net::SocketAddr;

use tracing::info;

use mxl2ics_server::{HttpServer, SignalHandler};

use crate::config::AppConfig;
use crate::error::CliResult;

/// Runs the HTTP endpoint until SIGINT or SIGTERM.
///
/// `bind` and `max_body_bytes` override the values from the config file.
pub async fn run(
    config: &AppConfig,
    bind: Option<SocketAddr>,
    max_body_bytes: Option<usize>,
) -> CliResult<()> {
    let server_config = config.to_server_config(bind, max_body_bytes);

    let signals = SignalHandler::new();
    signals.spawn_listener();

    let server = HttpServer::bind(server_config).await?;
    info!(addr = %server.local_addr()?, "Starting mxl2ics server");

    server.run(signals.shutdown()).await?;
    Ok(())
}
