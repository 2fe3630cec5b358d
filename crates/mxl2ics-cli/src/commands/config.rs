//! Configuration commands.

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Renders the configuration as TOML.
pub fn render(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))
}

/// Dump the effective configuration to stdout.
pub fn dump(config: &AppConfig) -> CliResult<()> {
    println!("# config.toml ({})", AppConfig::default_path().display());
    println!("{}", render(config)?);
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> CliResult<()> {
    println!("config: {}", AppConfig::default_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_sections() {
        let text = render(&AppConfig::default()).unwrap();
        assert!(text.contains("debug = false"));
        assert!(text.contains("[server]"));
        assert!(text.contains("max_body_bytes = 1048576"));
    }

    #[test]
    fn render_includes_log_format_when_set() {
        let mut config = AppConfig::default();
        config.logging.format = Some("pretty".to_string());
        let text = render(&config).unwrap();
        assert!(text.contains("[logging]"));
        assert!(text.contains("format = \"pretty\""));
    }
}
