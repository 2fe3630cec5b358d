//! HTTP endpoint: XML body in, iCalendar out.
//!
//! This crate wraps the conversion engine in an axum service:
//! - `POST /` or `POST /convert` with the feed as the request body
//! - `200` with a `text/calendar` document on success
//! - `400` with `Error: <message>` when the feed cannot be converted
//!
//! # Example
//!
//! ```rust,no_run
//! use mxl2ics_server::{HttpServer, ServerConfig, SignalHandler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let signals = SignalHandler::new();
//!     signals.spawn_listener();
//!
//!     let server = HttpServer::bind(ServerConfig::default()).await?;
//!     server.run(signals.shutdown()).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod handler;
mod server;
mod signals;

pub use config::{DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT, ServerConfig, default_bind_addr};
pub use error::{ServerError, ServerResult};
pub use handler::{
    AppState, CALENDAR_CONTENT_TYPE, ConvertRejection, SharedClock, router_with_state,
};
pub use server::HttpServer;
pub use signals::{ShutdownSignal, SignalHandler};
