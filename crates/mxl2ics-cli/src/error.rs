//! CLI error types.

use std::fmt;
use std::path::PathBuf;

use mxl2ics_core::{ConvertError, TracingError};
use mxl2ics_server::ServerError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error.
    Config(String),
    /// Reading or writing a named file failed.
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    /// IO error on a standard stream.
    Io(std::io::Error),
    /// The feed could not be converted.
    Convert(ConvertError),
    /// The HTTP endpoint failed.
    Server(ServerError),
    /// Logging could not be set up.
    Logging(TracingError),
}

impl CliError {
    /// Creates a file error.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::File { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Convert(err) => write!(f, "conversion failed: {}", err),
            Self::Server(err) => write!(f, "server error: {}", err),
            Self::Logging(err) => write!(f, "logging error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::File { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            Self::Convert(err) => Some(err),
            Self::Server(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConvertError> for CliError {
    fn from(err: ConvertError) -> Self {
        Self::Convert(err)
    }
}

impl From<ServerError> for CliError {
    fn from(err: ServerError) -> Self {
        Self::Server(err)
    }
}

impl From<TracingError> for CliError {
    fn from(err: TracingError) -> Self {
        Self::Logging(err)
    }
}
