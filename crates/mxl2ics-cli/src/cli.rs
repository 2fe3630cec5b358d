//! Command-line interface definition.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

use mxl2ics_core::{TracingConfig, TracingOutputFormat};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// mxl2ics - convert an XML schedule feed to iCalendar
#[derive(Debug, Parser)]
#[command(name = "mxl2ics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MXL2ICS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<Level>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Builds the tracing configuration from flags and the config file.
    ///
    /// `--debug` or `debug = true` switches to the debug preset. `--log-level`
    /// then overrides its level, and a log format from the command line wins
    /// over the one in the config file.
    pub fn tracing_config(&self, config: &AppConfig) -> CliResult<TracingConfig> {
        let mut tracing = match (&self.command, self.debug || config.debug) {
            (_, true) => TracingConfig::cli_debug(),
            (Command::Serve { .. }, false) => TracingConfig::daemon(),
            _ => TracingConfig::default(),
        };

        if let Some(level) = self.log_level {
            tracing = tracing.with_level(level);
        }

        if let Some(format) = self.log_format.as_deref().or(config.logging.format.as_deref()) {
            let format: TracingOutputFormat = format.parse().map_err(CliError::Logging)?;
            tracing = tracing.with_format(format);
        }

        Ok(tracing)
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert an XML feed file to an iCalendar file
    Convert {
        /// XML feed to read
        input: PathBuf,

        /// Where to write the calendar (stdout when omitted or `-`)
        output: Option<PathBuf>,
    },

    /// Run the HTTP conversion endpoint in the foreground
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Largest accepted request body, in bytes
        #[arg(long)]
        max_body_bytes: Option<usize>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration
    Dump,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn convert_with_output() {
        let cli = parse(&["mxl2ics", "convert", "feed.xml", "out.ics"]);
        match cli.command {
            Command::Convert { input, output } => {
                assert_eq!(input, PathBuf::from("feed.xml"));
                assert_eq!(output, Some(PathBuf::from("out.ics")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn convert_output_is_optional() {
        let cli = parse(&["mxl2ics", "convert", "feed.xml"]);
        assert!(matches!(cli.command, Command::Convert { output: None, .. }));
    }

    #[test]
    fn convert_requires_input() {
        assert!(Cli::try_parse_from(["mxl2ics", "convert"]).is_err());
    }

    #[test]
    fn serve_overrides() {
        let cli = parse(&[
            "mxl2ics",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--max-body-bytes",
            "2048",
        ]);
        match cli.command {
            Command::Serve {
                bind,
                max_body_bytes,
            } => {
                assert_eq!(bind, Some("0.0.0.0:8080".parse().unwrap()));
                assert_eq!(max_body_bytes, Some(2048));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_rejects_bad_address() {
        assert!(Cli::try_parse_from(["mxl2ics", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["mxl2ics", "config", "path", "-v", "--config", "/tmp/c.toml"]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn tracing_defaults_per_command() {
        let config = AppConfig::default();

        let convert = parse(&["mxl2ics", "convert", "a.xml"]);
        let tracing = convert.tracing_config(&config).unwrap();
        assert_eq!(tracing.default_level, Level::WARN);

        let serve = parse(&["mxl2ics", "serve"]);
        let tracing = serve.tracing_config(&config).unwrap();
        assert_eq!(tracing.default_level, Level::INFO);
        assert_eq!(tracing.output_format, TracingOutputFormat::Json);
    }

    #[test]
    fn debug_from_config_file() {
        let config = AppConfig {
            debug: true,
            ..Default::default()
        };
        let cli = parse(&["mxl2ics", "serve"]);
        let tracing = cli.tracing_config(&config).unwrap();
        assert_eq!(tracing.default_level, Level::DEBUG);
    }

    #[test]
    fn log_format_flag_beats_config() {
        let mut config = AppConfig::default();
        config.logging.format = Some("json".to_string());

        let cli = parse(&["mxl2ics", "--log-format", "pretty", "convert", "a.xml"]);
        let tracing = cli.tracing_config(&config).unwrap();
        assert_eq!(tracing.output_format, TracingOutputFormat::Pretty);

        let cli = parse(&["mxl2ics", "convert", "a.xml"]);
        let tracing = cli.tracing_config(&config).unwrap();
        assert_eq!(tracing.output_format, TracingOutputFormat::Json);
    }

    #[test]
    fn log_level_flag_overrides_preset() {
        let cli = parse(&["mxl2ics", "serve", "--log-level", "trace"]);
        let tracing = cli.tracing_config(&AppConfig::default()).unwrap();
        assert_eq!(tracing.default_level, Level::TRACE);
        assert_eq!(tracing.output_format, TracingOutputFormat::Json);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["mxl2ics", "--log-level", "loud", "config", "path"]).is_err());
    }

    #[test]
    fn unknown_log_format_is_an_error() {
        let cli = parse(&["mxl2ics", "--log-format", "xml", "convert", "a.xml"]);
        let err = cli.tracing_config(&AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Logging(_)));
    }
}
