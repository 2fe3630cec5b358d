//! CLI: one-shot conversion, HTTP endpoint, configuration
//!
//! This crate provides the `mxl2ics` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::AppConfig;
pub use error::{CliError, CliResult};
