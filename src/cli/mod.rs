//! CLI module for torrent-aio
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

/// torrent-aio release preparation tool
///
/// Probes a movie file, identifies it on TMDB, renames it to a scene-style
/// release name and writes the NFO, the BBCode presentation, the package
/// layout and the .torrent file next to it.
#[derive(Parser, Debug)]
#[command(name = "torrent-aio")]
#[command(about = "torrent-aio - Movie release naming and reporting")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log output format: pretty, compact or json
    #[arg(long, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// Configuration file (TOML or YAML)
    #[arg(long, global = true, env = "TORRENT_AIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe, identify, rename and write reports for a movie file
    Process(args::ProcessArgs),
    /// Compose a release name from saved probe and movie files
    Name(args::NameArgs),
    /// Show the piece length and total size for a file or directory
    Plan(args::PlanArgs),
    /// Print the search keywords extracted from a file name
    Keywords(args::KeywordsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "torrent-aio",
            "keywords",
            "Heat.1995.mkv",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Keywords(_)));
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["torrent-aio", "--log-level", "loud", "plan", "."]).is_err());
    }
}
