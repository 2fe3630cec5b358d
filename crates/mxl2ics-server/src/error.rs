//! Server error types.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// IO error while serving.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ServerError {
    /// Creates a bind error.
    pub fn bind(addr: SocketAddr, source: io::Error) -> Self {
        Self::Bind { addr, source }
    }
}
