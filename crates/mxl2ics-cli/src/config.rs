//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/mxl2ics/config.toml` by default. Every field has a default, so
//! a missing file or an empty one behaves the same.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mxl2ics_server::{DEFAULT_MAX_BODY_BYTES, ServerConfig, default_bind_addr};

/// Configuration for the mxl2ics binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Debug mode.
    pub debug: bool,

    /// HTTP endpoint settings.
    pub server: ServerSettings,

    /// Log output settings.
    pub logging: LoggingSettings,
}

/// HTTP endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind_addr(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `pretty`, `compact` or `json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mxl2ics")
    }

    /// Server configuration with optional command-line overrides applied.
    pub fn to_server_config(
        &self,
        bind: Option<SocketAddr>,
        max_body_bytes: Option<usize>,
    ) -> ServerConfig {
        ServerConfig::new(bind.unwrap_or(self.server.bind))
            .with_max_body_bytes(max_body_bytes.unwrap_or(self.server.max_body_bytes))
    }
}
