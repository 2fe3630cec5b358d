//! Logging setup shared by the CLI and the HTTP server.
//!
//! Logs always go to stderr so a `convert` run writing the calendar to stdout
//! stays clean. `RUST_LOG` wins over the configured level.
//!
//! ```ignore
//! use mxl2ics_core::{TracingConfig, init_tracing};
//!
//! init_tracing(TracingConfig::daemon())?;
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt as subscriber_fmt, prelude::*};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("unknown log format '{0}' (expected pretty, compact or json)")]
    UnknownFormat(String),
}

/// How log records are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Multi-line, for reading at a terminal.
    Pretty,
    /// One line per record.
    #[default]
    Compact,
    /// One JSON object per line, for log collectors.
    Json,
}

impl TracingOutputFormat {
    /// Name used in the config file and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for TracingOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TracingOutputFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Pretty, Self::Compact, Self::Json]
            .into_iter()
            .find(|format| s.trim().eq_ignore_ascii_case(format.as_str()))
            .ok_or_else(|| TracingError::UnknownFormat(s.trim().to_string()))
    }
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for mxl2ics and request tracing when `RUST_LOG` is unset.
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Source file and line of each record.
    pub include_location: bool,
    /// Module path of each record.
    pub include_target: bool,
    pub include_timestamp: bool,
}

impl Default for TracingConfig {
    /// Quiet one-shot conversions: warnings only, no timestamps.
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: false,
            include_timestamp: false,
        }
    }
}

impl TracingConfig {
    /// `--debug` runs: everything down to DEBUG, with source locations.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            include_target: true,
            ..Self::default()
        }
    }

    /// The long-running HTTP endpoint: INFO as timestamped JSON.
    #[must_use]
    pub fn daemon() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Json,
            include_target: true,
            include_timestamp: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Filter directive applied when `RUST_LOG` is unset.
    fn directive(&self) -> String {
        format!(
            "mxl2ics={level},tower_http={level}",
            level = self.default_level
        )
    }

    fn env_filter(&self) -> Result<EnvFilter, TracingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(self.directive())?),
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = subscriber_fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_target(self.include_target);

        match (self.output_format, self.include_timestamp) {
            (TracingOutputFormat::Pretty, true) => layer.pretty().boxed(),
            (TracingOutputFormat::Pretty, false) => layer.pretty().without_time().boxed(),
            (TracingOutputFormat::Compact, true) => layer.compact().boxed(),
            (TracingOutputFormat::Compact, false) => layer.compact().without_time().boxed(),
            (TracingOutputFormat::Json, true) => layer.json().boxed(),
            (TracingOutputFormat::Json, false) => layer.json().without_time().boxed(),
        }
    }
}

/// Installs the global subscriber. Call once at process start.
///
/// # Errors
///
/// Fails if a subscriber is already installed or the filter is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let subscriber = tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(config.env_filter()?);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
